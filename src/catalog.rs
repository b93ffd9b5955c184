//! Streaming reader for the creature catalog CSV.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{TokenError, TokenResult};
use crate::models::{CatalogRow, REQUIRED_COLUMNS};

/// CSV catalog with validated headers, yielding one [`CatalogRow`] at a time.
pub struct CatalogReader {
    path: PathBuf,
    headers: Vec<String>,
    reader: csv::Reader<File>,
}

impl CatalogReader {
    /// Open a catalog and check that `Name`, `Source`, `Skills` and any `extra_required`
    /// columns are present.
    pub fn open(path: impl AsRef<Path>, extra_required: &[&str]) -> TokenResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut reader = csv::Reader::from_path(&path).map_err(|source| csv_error(&path, source))?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(|source| csv_error(&path, source))?
            .iter()
            .map(str::to_string)
            .collect();

        for column in REQUIRED_COLUMNS.iter().chain(extra_required) {
            if !headers.iter().any(|header| header == *column) {
                return Err(TokenError::MissingHeader {
                    path,
                    column: column.to_string(),
                });
            }
        }

        Ok(Self {
            path,
            headers,
            reader,
        })
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Iterate the data rows.
    pub fn rows(&mut self) -> impl Iterator<Item = TokenResult<CatalogRow>> + '_ {
        let path = &self.path;
        let headers = &self.headers;
        self.reader.records().map(move |record| {
            let record = record.map_err(|source| csv_error(path, source))?;
            Ok(CatalogRow::new(
                headers
                    .iter()
                    .cloned()
                    .zip(record.iter().map(str::to_string))
                    .collect(),
            ))
        })
    }
}

fn csv_error(path: &Path, source: csv::Error) -> TokenError {
    TokenError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_catalog(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bestiary.csv");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn reads_rows_in_header_order() {
        let (_dir, path) = write_catalog(
            "Name,CR,Source,Skills\n\
             Goblin,1/3,Bestiary,\"Stealth +5, Ride +4\"\n\
             \"Wolf, 1st form\",1,Bestiary,\n",
        );

        let mut catalog = CatalogReader::open(&path, &[]).unwrap();
        assert_eq!(catalog.headers(), ["Name", "CR", "Source", "Skills"]);

        let rows: Vec<CatalogRow> = catalog.rows().collect::<TokenResult<_>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name(), "Goblin");
        assert_eq!(rows[0].skills(), "Stealth +5, Ride +4");
        assert_eq!(rows[1].name(), "Wolf, 1st form");
        assert_eq!(rows[1].get("CR"), Some("1"));
    }

    #[test]
    fn rejects_catalogs_without_required_columns() {
        let (_dir, path) = write_catalog("Name,Source\nGoblin,Bestiary\n");
        let err = CatalogReader::open(&path, &[]).err().unwrap();
        assert!(matches!(err, TokenError::MissingHeader { ref column, .. } if column == "Skills"));
    }

    #[test]
    fn checks_extra_required_columns() {
        let (_dir, path) = write_catalog("Name,Source,Skills\nGoblin,Bestiary,\n");
        assert!(CatalogReader::open(&path, &[]).is_ok());

        let err = CatalogReader::open(&path, &["Space"]).err().unwrap();
        assert!(matches!(err, TokenError::MissingHeader { ref column, .. } if column == "Space"));
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let dir = tempdir().unwrap();
        let err = CatalogReader::open(dir.path().join("missing.csv"), &[]).err().unwrap();
        assert!(matches!(err, TokenError::Csv { .. }));
    }

    #[test]
    fn ragged_rows_are_reported() {
        let (_dir, path) = write_catalog("Name,Source,Skills\nGoblin,Bestiary\n");
        let mut catalog = CatalogReader::open(&path, &[]).unwrap();
        let first = catalog.rows().next().unwrap();
        assert!(matches!(first, Err(TokenError::Csv { .. })));
    }
}
