//! Data structures passed between the catalog reader, the resolver and the packager.

use std::path::PathBuf;

/// Column holding the creature display name.
pub const NAME_COLUMN: &str = "Name";
/// Column naming the image subdirectory to search.
pub const SOURCE_COLUMN: &str = "Source";
/// Column holding the comma separated skill list.
pub const SKILLS_COLUMN: &str = "Skills";
/// Column holding the creature space, used when size codes are requested.
pub const SPACE_COLUMN: &str = "Space";

/// Columns every catalog must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = [NAME_COLUMN, SOURCE_COLUMN, SKILLS_COLUMN];

/// One catalog line as an ordered list of column/value pairs.
///
/// Header order is preserved so emitted property maps are stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
  fields: Vec<(String, String)>,
}

impl CatalogRow {
  /// Build a row from column/value pairs in header order.
  pub fn new(fields: Vec<(String, String)>) -> Self {
    Self { fields }
  }

  /// Value of a column, if present.
  pub fn get(&self, column: &str) -> Option<&str> {
    self
      .fields
      .iter()
      .find(|(key, _)| key == column)
      .map(|(_, value)| value.as_str())
  }

  /// Display name of the creature.
  pub fn name(&self) -> &str {
    self.get(NAME_COLUMN).unwrap_or_default()
  }

  /// Image subdirectory for this row.
  pub fn source(&self) -> &str {
    self.get(SOURCE_COLUMN).unwrap_or_default()
  }

  /// Raw skill list.
  pub fn skills(&self) -> &str {
    self.get(SKILLS_COLUMN).unwrap_or_default()
  }

  /// Every column except the display name, in header order.
  pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .fields
      .iter()
      .filter(|(key, _)| key != NAME_COLUMN)
      .map(|(key, value)| (key.as_str(), value.as_str()))
  }
}

/// Image matched for a catalog name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
  /// Existing image file.
  pub path: PathBuf,
  /// Part of the catalog name not encoded in the image file name.
  pub qualifier: Option<String>,
}

impl ResolvedImage {
  /// Image matched without a leftover qualifier.
  pub fn exact(path: PathBuf) -> Self {
    Self {
      path,
      qualifier: None,
    }
  }
}

/// Token property with its lookup key.
///
/// MapTool reads properties case-insensitively; `normalized_key` carries the lowercased key
/// used for lookup while `key` keeps the spelling shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
  /// Key as written in the catalog.
  pub key: String,
  /// Lowercased lookup key.
  pub normalized_key: String,
  /// Property value.
  pub value: String,
}

impl PropertyEntry {
  /// Create an entry, deriving the lookup key.
  pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
    let key = key.into();
    Self {
      normalized_key: key.to_lowercase(),
      key,
      value: value.into(),
    }
  }
}
