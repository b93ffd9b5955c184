//! Error type shared by the catalog reader, the packager and the build driver.

use std::path::PathBuf;

/// Result alias used across the crate.
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors that abort a token build.
///
/// Failing to find an image for a catalog row is not an error; the resolver reports it as
/// `None` and the row is skipped.
#[derive(Debug)]
pub enum TokenError {
  /// Reading or writing a file failed.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// The catalog could not be read as CSV.
  Csv {
    /// Catalog path.
    path: PathBuf,
    /// Source CSV error.
    source: csv::Error,
  },
  /// A configuration file exists but does not parse.
  Config {
    /// Configuration path.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// Writing the token archive failed.
  Archive {
    /// Archive being written.
    path: PathBuf,
    /// Source zip error.
    source: zip::result::ZipError,
  },
  /// The catalog header lacks a column the build needs.
  MissingHeader {
    /// Catalog path.
    path: PathBuf,
    /// Name of the missing column.
    column: String,
  },
  /// A catalog row has no value for a column the build needs.
  MissingColumn {
    /// Display name of the row.
    name: String,
    /// Name of the missing column.
    column: String,
  },
  /// The `Space` column holds a value outside the size table.
  UnknownSpace {
    /// Display name of the row.
    name: String,
    /// Offending value.
    value: String,
  },
  /// Writing progress output failed.
  Output(std::io::Error),
}

impl TokenError {
  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
    let path = path.into();
    move |source| Self::Io { path, source }
  }

  pub(crate) fn archive(path: impl Into<PathBuf>) -> impl FnOnce(zip::result::ZipError) -> Self {
    let path = path.into();
    move |source| Self::Archive { path, source }
  }
}

impl std::fmt::Display for TokenError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => write!(f, "failed to access {}: {}", path.display(), source),
      Self::Csv { path, source } => write!(f, "failed to read catalog {}: {}", path.display(), source),
      Self::Config { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::Archive { path, source } => {
        write!(f, "failed to write archive {}: {}", path.display(), source)
      }
      Self::MissingHeader { path, column } => {
        write!(f, "catalog {} has no `{}` column", path.display(), column)
      }
      Self::MissingColumn { name, column } => {
        write!(f, "row `{}` has no `{}` value", name, column)
      }
      Self::UnknownSpace { name, value } => {
        write!(f, "row `{}` has unsupported Space value `{}`", name, value)
      }
      Self::Output(source) => write!(f, "failed to write progress output: {}", source),
    }
  }
}

impl std::error::Error for TokenError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Csv { source, .. } => Some(source),
      Self::Config { source, .. } => Some(source),
      Self::Archive { source, .. } => Some(source),
      Self::Output(source) => Some(source),
      Self::MissingHeader { .. } | Self::MissingColumn { .. } | Self::UnknownSpace { .. } => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::error::Error;

  #[test]
  fn io_errors_name_the_path_and_keep_the_source() {
    let err = TokenError::io("images/Angel, Solar.png")(std::io::Error::new(
      std::io::ErrorKind::PermissionDenied,
      "denied",
    ));

    assert!(err.to_string().contains("images/Angel, Solar.png"));
    assert!(err.source().is_some());
  }

  #[test]
  fn space_errors_name_the_row_and_value() {
    let err = TokenError::UnknownSpace {
      name: "Goblin".into(),
      value: "7".into(),
    };

    assert_eq!(err.to_string(), "row `Goblin` has unsupported Space value `7`");
    assert!(err.source().is_none());
  }
}
