//! Catalog-to-token build driver.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::CatalogReader;
use crate::error::{TokenError, TokenResult};
use crate::models::{CatalogRow, SPACE_COLUMN};
use crate::resolver::{NameResolver, ResolverRules, search_root};
use crate::token::{TokenPackager, TokenTemplate};

/// Inputs shared by every row of a build.
#[derive(Debug, Clone, Copy)]
pub struct TokenBuildContext<'a> {
  /// Directory holding one image subdirectory per catalog `Source`.
  pub image_root: &'a Path,
  /// Resolver vocabulary.
  pub rules: &'a ResolverRules,
  /// Fixed token settings.
  pub template: &'a TokenTemplate,
  /// Map the `Space` column to MapTool grid sizes.
  pub map_sizes: bool,
}

/// Outcome of a catalog build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
  /// Archives written, in catalog order.
  pub written: Vec<PathBuf>,
  /// Display names for which no image was found.
  pub unresolved: Vec<String>,
}

/// Processes catalog rows one at a time: resolve the image, then package the token.
pub struct TokenBuilder<'a> {
  context: TokenBuildContext<'a>,
  resolver: NameResolver<'a>,
  packager: TokenPackager<'a>,
}

impl<'a> TokenBuilder<'a> {
  /// Create a builder for the provided build context.
  pub fn new(context: TokenBuildContext<'a>) -> Self {
    Self {
      resolver: NameResolver::new(context.rules),
      packager: TokenPackager::new(context.template, context.map_sizes),
      context,
    }
  }

  /// Convert every row of `catalog`, printing each resolved display name to `progress`.
  ///
  /// Rows without a matching image are skipped. The first packaging error stops the build.
  pub fn build<W: Write>(&self, catalog: &Path, progress: &mut W) -> TokenResult<BuildSummary> {
    let extra_required: &[&str] = if self.context.map_sizes {
      &[SPACE_COLUMN]
    } else {
      &[]
    };
    let mut reader = CatalogReader::open(catalog, extra_required)?;
    let mut summary = BuildSummary::default();

    for row in reader.rows() {
      let row = row?;
      match self.build_row(&row, progress)? {
        Some(archive) => summary.written.push(archive),
        None => summary.unresolved.push(row.name().to_string()),
      }
    }

    debug!(
      written = summary.written.len(),
      unresolved = summary.unresolved.len(),
      "catalog build finished"
    );
    Ok(summary)
  }

  /// Resolve and package a single row; `Ok(None)` when no image matches.
  pub fn build_row<W: Write>(
    &self,
    row: &CatalogRow,
    progress: &mut W,
  ) -> TokenResult<Option<PathBuf>> {
    let root = search_root(self.context.image_root, row.source());
    let Some(image) = self.resolver.resolve(&root, row.name()) else {
      return Ok(None);
    };

    writeln!(progress, "{}", row.name()).map_err(TokenError::Output)?;
    self.packager.package(row, &image).map(Some)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::BTreeMap;
  use std::fs::{self, File};
  use std::io::Read;
  use tempfile::tempdir;

  use crate::token::content_hash;

  struct Fixture {
    _dir: tempfile::TempDir,
    root: PathBuf,
    images: PathBuf,
    catalog: PathBuf,
  }

  fn fixture(catalog: &str, images: &[(&str, &[u8])]) -> Fixture {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let image_dir = root.join("img");
    fs::create_dir_all(image_dir.join("Bestiary")).unwrap();
    for (name, bytes) in images {
      fs::write(image_dir.join("Bestiary").join(name), bytes).unwrap();
    }
    let catalog_path = root.join("catalog.csv");
    fs::write(&catalog_path, catalog).unwrap();

    Fixture {
      _dir: dir,
      root,
      images: image_dir,
      catalog: catalog_path,
    }
  }

  fn run(fixture: &Fixture, map_sizes: bool) -> (TokenResult<BuildSummary>, String) {
    let rules = ResolverRules::default();
    let template = TokenTemplate::default();
    let builder = TokenBuilder::new(TokenBuildContext {
      image_root: &fixture.images,
      rules: &rules,
      template: &template,
      map_sizes,
    });

    let mut progress = Vec::new();
    let result = builder.build(&fixture.catalog, &mut progress);
    (result, String::from_utf8(progress).unwrap())
  }

  fn archive_entries(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entries = BTreeMap::new();
    for index in 0..archive.len() {
      let mut file = archive.by_index(index).unwrap();
      let mut bytes = Vec::new();
      file.read_to_end(&mut bytes).unwrap();
      entries.insert(file.name().to_string(), bytes);
    }
    entries
  }

  const CATALOG: &str = "Name,Source,Skills,Space\n\
    Huge Fire Elemental,Bestiary,\"Perception +12, Stealth +8, Acrobatics\",15\n\
    Kobold,Bestiary,,5\n\
    \"Wolf, 1st form\",Bestiary,Survival +6,5\n";

  #[test]
  fn builds_archives_for_resolved_rows_and_skips_the_rest() {
    let fixture = fixture(CATALOG, &[
      ("Elemental, Fire.png", b"fire"),
      ("Lycanthrope, Wolf.png", b"wolf"),
    ]);

    let (result, progress) = run(&fixture, true);
    let summary = result.unwrap();

    assert_eq!(progress, "Huge Fire Elemental\nWolf, 1st form\n");
    assert_eq!(summary.unresolved, vec!["Kobold".to_string()]);
    assert_eq!(summary.written, vec![
      fixture.images.join("Bestiary/Elemental, Fire, Huge.rptok"),
      fixture.images.join("Bestiary/Lycanthrope, Wolf.rptok"),
    ]);

    let entries = archive_entries(&summary.written[0]);
    let id = content_hash(b"fire");
    let names: Vec<&str> = entries.keys().map(String::as_str).collect();
    assert_eq!(names, vec![
      "assets/".to_string(),
      format!("assets/{id}"),
      format!("assets/{id}.png"),
      "content.xml".to_string(),
      "properties.xml".to_string(),
    ]);
    assert_eq!(content_hash(&entries[&format!("assets/{id}.png")]), id);

    let content = String::from_utf8(entries["content.xml"].clone()).unwrap();
    assert!(content.contains(&format!("<id>{id}</id>")));
    assert!(content.contains("<key>Perception</key><value class=\"string\">12</value>"));
    assert!(content.contains("<key>Stealth</key><value class=\"string\">8</value>"));
    assert!(!content.contains("<key>Acrobatics</key>"));
    assert!(content.contains("<baGUID>fwABAdBlFSoHAAAAKgABAA==</baGUID>"));
  }

  #[test]
  fn repeated_builds_produce_identical_archives() {
    let fixture = fixture(CATALOG, &[("Elemental, Fire.png", b"fire")]);

    let (first, _) = run(&fixture, true);
    let archive = first.unwrap().written.remove(0);
    let first_bytes = fs::read(&archive).unwrap();

    let (second, _) = run(&fixture, true);
    assert_eq!(second.unwrap().written, vec![archive.clone()]);
    assert_eq!(fs::read(&archive).unwrap(), first_bytes);
  }

  #[test]
  fn unknown_space_stops_the_build() {
    let fixture = fixture(
      "Name,Source,Skills,Space\nGoblin,Bestiary,,7\n",
      &[("Goblin.png", b"goblin")],
    );

    let (result, progress) = run(&fixture, true);
    assert!(matches!(result, Err(TokenError::UnknownSpace { .. })));
    assert_eq!(progress, "Goblin\n");
    assert!(!fixture.images.join("Bestiary/Goblin.rptok").exists());
  }

  #[test]
  fn space_column_is_only_required_with_sizes() {
    let fixture = fixture(
      "Name,Source,Skills\nGoblin,Bestiary,Stealth +5\n",
      &[("Goblin.png", b"goblin")],
    );

    let (result, _) = run(&fixture, true);
    assert!(matches!(result, Err(TokenError::MissingHeader { .. })));
    assert!(!fixture.images.join("Bestiary/Goblin.rptok").exists());

    let (result, _) = run(&fixture, false);
    assert_eq!(result.unwrap().written, vec![
      fixture.images.join("Bestiary/Goblin.rptok")
    ]);
  }

  #[test]
  fn absolute_sources_cannot_leave_the_image_root() {
    let outside = tempdir().unwrap();
    fs::write(outside.path().join("Goblin.png"), b"goblin").unwrap();
    let catalog = format!(
      "Name,Source,Skills\nGoblin,{},\n",
      outside.path().display()
    );
    let fixture = fixture(&catalog, &[]);

    let (result, progress) = run(&fixture, false);
    let summary = result.unwrap();
    assert!(summary.written.is_empty());
    assert_eq!(summary.unresolved, vec!["Goblin".to_string()]);
    assert!(progress.is_empty());
    assert_eq!(fs::read_dir(outside.path()).unwrap().count(), 1);
  }

  #[test]
  fn names_with_leading_separators_resolve_under_the_source() {
    let fixture = fixture(
      "Name,Source,Skills\n/Goblin,/Bestiary,\n",
      &[("Goblin.png", b"goblin")],
    );

    let (result, _) = run(&fixture, false);
    assert_eq!(result.unwrap().written, vec![
      fixture.images.join("Bestiary/Goblin.rptok")
    ]);
  }

  #[test]
  fn unresolved_rows_leave_the_image_tree_untouched() {
    let fixture = fixture(
      "Name,Source,Skills\nKobold,Bestiary,\nGoblin,Missing,\n",
      &[("Goblin.png", b"goblin")],
    );

    let (result, progress) = run(&fixture, false);
    let summary = result.unwrap();
    assert!(summary.written.is_empty());
    assert_eq!(summary.unresolved.len(), 2);
    assert!(progress.is_empty());
    assert_eq!(fs::read_dir(fixture.images.join("Bestiary")).unwrap().count(), 1);
    assert!(fixture.root.join("catalog.csv").exists());
  }
}
