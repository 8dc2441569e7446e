//! # Copier Module
//!
//! Copies a photo into place while keeping its permission bits and
//! access/modification times. The source is never touched.

use crate::error::CopyError;
use filetime::{set_file_times, FileTime};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Places files at their destination.
///
/// Implement this trait to intercept filesystem writes (e.g., for testing).
pub trait FileCopier: Send + Sync {
    /// Create `dir` and its parents if missing
    fn ensure_dir(&self, dir: &Path) -> Result<(), CopyError> {
        fs::create_dir_all(dir).map_err(|source| CopyError::CreateDirectory {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// Copy `from` to `to`, which must not exist yet
    fn copy(&self, from: &Path, to: &Path) -> Result<(), CopyError>;
}

/// Copier backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCopier;

impl FsCopier {
    pub fn new() -> Self {
        Self
    }

    fn preserve_times(from: &Path, to: &Path) -> std::io::Result<()> {
        let metadata = fs::metadata(from)?;
        let accessed = FileTime::from_last_access_time(&metadata);
        let modified = FileTime::from_last_modification_time(&metadata);
        set_file_times(to, accessed, modified)
    }

    /// Remove a copy that could not be finished. Returns whether it is gone.
    fn discard_partial(to: &Path) -> bool {
        match fs::remove_file(to) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %to.display(), error = %e, "could not remove incomplete copy");
                false
            }
        }
    }
}

impl FileCopier for FsCopier {
    fn copy(&self, from: &Path, to: &Path) -> Result<(), CopyError> {
        // fs::copy carries permission bits over
        let bytes = fs::copy(from, to).map_err(|source| CopyError::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?;

        if let Err(source) = Self::preserve_times(from, to) {
            // Leave nothing half-placed behind
            Self::discard_partial(to);
            return Err(CopyError::PreserveAttributes {
                to: to.to_path_buf(),
                source,
            });
        }

        debug!(from = %from.display(), to = %to.display(), bytes, "copied");
        Ok(())
    }
}
