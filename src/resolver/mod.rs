//! Resolve catalog display names to token images on disk.
//!
//! Images are filed as `"Category, Specific"` while catalog names read `"Modifier Specific"`
//! or `"Specific, Modifier"`. The resolver expands a name into an ordered list of candidate
//! file stems (see [`candidates`]) and returns the first one that exists, together with any
//! qualifier the matched file name does not carry. Matching is a fixed rule cascade; there is
//! no scoring.

mod candidates;
mod lookup;
mod rules;

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::models::ResolvedImage;

pub use candidates::{Candidate, generate_name_candidates};
pub use lookup::{FsLookup, ImageLookup};
pub use rules::{DEFAULT_IMAGE_EXTENSION, DEFAULT_TYPE_PREFIXES, ResolverRules};

/// Matches catalog names against the images of one search root.
pub struct NameResolver<'a, P = FsLookup> {
    rules: &'a ResolverRules,
    lookup: P,
}

impl<'a> NameResolver<'a, FsLookup> {
    /// Resolver that checks the real filesystem.
    pub fn new(rules: &'a ResolverRules) -> Self {
        Self::with_lookup(rules, FsLookup)
    }
}

impl<'a, P: ImageLookup> NameResolver<'a, P> {
    /// Resolver using a custom existence check.
    pub fn with_lookup(rules: &'a ResolverRules, lookup: P) -> Self {
        Self { rules, lookup }
    }

    /// Find the image for `name` below `root`.
    ///
    /// Returns `None` when no candidate exists; callers skip such rows. Nothing on disk is
    /// created or modified.
    pub fn resolve(&self, root: &Path, name: &str) -> Option<ResolvedImage> {
        for candidate in generate_name_candidates(self.rules, name) {
            let file_name = format!("{}.{}", candidate.stem, self.rules.image_extension);
            let path = join_within(root, &file_name);
            if self.lookup.exists(&path) {
                debug!(name, image = %path.display(), "resolved token image");
                return Some(ResolvedImage {
                    path,
                    qualifier: candidate.qualifier,
                });
            }
        }

        debug!(name, root = %root.display(), "no token image matched");
        None
    }
}

/// Directory searched for a row: `image_root/<source>`, never outside `image_root`.
pub fn search_root(image_root: &Path, source: &str) -> PathBuf {
    join_within(image_root, source)
}

/// Append `relative` below `base`, keeping only plain name components so that absolute
/// paths, drive prefixes and `..` in catalog values cannot leave `base`.
fn join_within(base: &Path, relative: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for component in Path::new(relative).components() {
        if let Component::Normal(part) = component {
            path.push(part);
        }
    }
    path
}
