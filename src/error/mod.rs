//! # Error Module
//!
//! User-friendly error types for the photo organizer.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Per-file isolation** - only [`ScanError::DirectoryNotFound`] stops a run;
//!   everything else is reported against a single file

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Copy error: {0}")]
    Copy(#[from] CopyError),

    #[error("Collision error: {0}")]
    Collision(#[from] CollisionError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while walking the source tree
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Path the error refers to
    pub fn path(&self) -> &Path {
        match self {
            ScanError::DirectoryNotFound { path }
            | ScanError::NotADirectory { path }
            | ScanError::PermissionDenied { path }
            | ScanError::ReadDirectory { path, .. } => path,
        }
    }
}

/// Reasons a capture date could not be read
#[derive(Error, Debug)]
pub enum DateError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No readable EXIF data in {path}: {reason}")]
    NoExif { path: PathBuf, reason: String },

    #[error("No DateTimeOriginal tag in {path}")]
    MissingTag { path: PathBuf },

    #[error("Unparsable DateTimeOriginal {value:?} in {path}")]
    Unparsable { path: PathBuf, value: String },

    #[error("Failed to read modification time of {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while computing a content hash
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to read {path} for hashing: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while placing a file
#[derive(Error, Debug)]
pub enum CopyError {
    #[error("Failed to create folder {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Copied {to} but could not preserve its attributes: {source}")]
    PreserveAttributes {
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while resolving a name collision
#[derive(Error, Debug)]
pub enum CollisionError {
    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("No free name for {path} after {attempts} attempts")]
    Exhausted { path: PathBuf, attempts: u32 },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, OrganizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_includes_path() {
        let error = ScanError::DirectoryNotFound {
            path: PathBuf::from("/home/me/Downloads"),
        };
        let message = error.to_string();
        assert!(message.contains("/home/me/Downloads"));
    }

    #[test]
    fn copy_error_names_both_paths() {
        let error = CopyError::Copy {
            from: PathBuf::from("/src/beach.jpg"),
            to: PathBuf::from("/dest/2024/07-July/beach.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        let message = error.to_string();
        assert!(message.contains("/src/beach.jpg"));
        assert!(message.contains("07-July"));
        assert!(message.contains("disk full"));
    }

    #[test]
    fn exhausted_collision_reports_attempts() {
        let error = CollisionError::Exhausted {
            path: PathBuf::from("/dest/2024/01-January/IMG_0001.jpg"),
            attempts: 10,
        };
        assert!(error.to_string().contains("10 attempts"));
    }

    #[test]
    fn hash_error_converts_through_collision() {
        let hash = HashError::Io {
            path: PathBuf::from("/dest/a.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let top: OrganizerError = CollisionError::from(hash).into();
        assert!(top.to_string().contains("/dest/a.jpg"));
    }
}
