use std::path::Path;

/// Existence check used while walking the candidate list.
pub trait ImageLookup {
    /// Returns `true` when `path` names an existing image file.
    fn exists(&self, path: &Path) -> bool;
}

/// Lookup backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLookup;

impl ImageLookup for FsLookup {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

impl<P: ImageLookup + ?Sized> ImageLookup for &P {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}
