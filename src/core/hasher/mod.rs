//! # Hasher Module
//!
//! Computes content hashes used to tell true duplicates from name clashes.
//!
//! ## How It Works
//! 1. Open the file
//! 2. Feed it through MD5 in fixed-size chunks
//! 3. Compare the 128-bit digests
//!
//! Two files with equal digests are treated as byte-identical.
//!
//! ## Example
//! ```rust,ignore
//! use photo_organizer::core::hasher::ContentHasher;
//!
//! let hasher = ContentHasher::new();
//! let same = hasher.hash_file(&a)? == hasher.hash_file(&b)?;
//! ```

use crate::error::HashError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Default read size when streaming a file through the digest
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// A 128-bit content digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Get the digest as a hexadecimal string
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Streams files through MD5
#[derive(Debug, Clone)]
pub struct ContentHasher {
    chunk_size: usize,
}

impl ContentHasher {
    /// Create a hasher with the default chunk size
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the read size (minimum 1 byte)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Hash everything readable from `reader`
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> std::io::Result<ContentHash> {
        let mut context = md5::Context::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => context.consume(&buffer[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(ContentHash(context.compute().0))
    }

    /// Hash a file on disk
    pub fn hash_file(&self, path: &Path) -> Result<ContentHash, HashError> {
        let to_error = |source| HashError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(to_error)?;
        self.hash_reader(file).map_err(to_error)
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}
