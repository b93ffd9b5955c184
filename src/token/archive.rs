//! Scratch working directory and zip packaging for token archives.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{TokenError, TokenResult};

/// Per-token working directory, removed when dropped on every exit path.
#[derive(Debug)]
pub struct ScratchDir {
  dir: TempDir,
}

impl ScratchDir {
  /// Create an empty scratch directory under the system temp directory.
  pub fn new() -> TokenResult<Self> {
    let dir = tempfile::Builder::new()
      .prefix("token_forge-")
      .tempdir()
      .map_err(TokenError::io(std::env::temp_dir()))?;
    Ok(Self { dir })
  }

  /// Root of the working set.
  pub fn path(&self) -> &Path {
    self.dir.path()
  }

  /// Write `contents` to `relative`, creating parent directories.
  pub fn write(&self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> TokenResult<()> {
    let destination = self.dir.path().join(relative);
    if let Some(parent) = destination.parent() {
      fs::create_dir_all(parent).map_err(TokenError::io(parent))?;
    }
    fs::write(&destination, contents).map_err(TokenError::io(&destination))
  }
}

/// Zip the contents of `source_dir` into `destination`.
///
/// Entries are written in sorted path order with a fixed timestamp, so identical inputs give
/// byte-identical archives. The archive is staged next to `destination` and moved into place
/// once complete, replacing any existing file.
pub fn write_archive(source_dir: &Path, destination: &Path) -> TokenResult<()> {
  let parent = match destination.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  let staged = NamedTempFile::new_in(parent).map_err(TokenError::io(parent))?;

  let mut zip = ZipWriter::new(staged);
  append_directory(&mut zip, source_dir, Path::new(""), destination)?;
  let staged = zip.finish().map_err(TokenError::archive(destination))?;

  staged
    .persist(destination)
    .map_err(|err| TokenError::io(destination)(err.error))?;
  Ok(())
}

fn entry_options() -> FileOptions {
  FileOptions::default()
    .compression_method(CompressionMethod::Deflated)
    .last_modified_time(DateTime::default())
    .unix_permissions(0o644)
}

fn append_directory<W: Write + io::Seek>(
  zip: &mut ZipWriter<W>,
  root: &Path,
  relative: &Path,
  destination: &Path,
) -> TokenResult<()> {
  let current = root.join(relative);
  let mut entries = Vec::new();
  for entry in fs::read_dir(&current).map_err(TokenError::io(&current))? {
    let entry = entry.map_err(TokenError::io(&current))?;
    let file_type = entry.file_type().map_err(TokenError::io(entry.path()))?;
    entries.push((entry.file_name(), file_type.is_dir()));
  }
  entries.sort();

  for (file_name, is_dir) in entries {
    let child: PathBuf = relative.join(&file_name);
    let entry_name = child.to_string_lossy().replace('\\', "/");

    if is_dir {
      zip
        .add_directory(format!("{entry_name}/"), entry_options().unix_permissions(0o755))
        .map_err(TokenError::archive(destination))?;
      append_directory(zip, root, &child, destination)?;
    } else {
      let source = root.join(&child);
      zip
        .start_file(entry_name, entry_options())
        .map_err(TokenError::archive(destination))?;
      let mut file = File::open(&source).map_err(TokenError::io(&source))?;
      io::copy(&mut file, zip).map_err(TokenError::io(&source))?;
    }
  }

  Ok(())
}
