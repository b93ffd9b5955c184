use std::fs;
use std::path::Path;

use md5::{Digest, Md5};

use crate::error::{TokenError, TokenResult};

/// Image bytes together with their content hash.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    /// Lowercase hex MD5 of `bytes`; MapTool's asset key.
    pub id: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl ImageAsset {
    /// Read an image and hash it.
    pub fn load(path: &Path) -> TokenResult<Self> {
        let bytes = fs::read(path).map_err(TokenError::io(path))?;
        Ok(Self::from_bytes(bytes))
    }

    /// Hash bytes already in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            id: content_hash(&bytes),
            bytes,
        }
    }
}

/// Lowercase hex MD5 digest of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Md5::digest(bytes))
}
