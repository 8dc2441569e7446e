//! # Collision Module
//!
//! Handles a destination slot that is already occupied.
//!
//! If the occupant has the same content hash as the incoming file it is a
//! true duplicate and the incoming file is skipped. Otherwise the incoming
//! file gets the first free `{stem}_{n}{.ext}` name, probing n = 1, 2, 3, ...
//!
//! Only the first slot is hash-compared. A `_1` that happens to hold the
//! same bytes is not detected; the probe just moves past it.

use crate::core::hasher::ContentHasher;
use crate::error::CollisionError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default cap on `_n` probes per file
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// What to do with a file whose destination is taken
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Identical content already lives there
    Duplicate,
    /// Different content lives there; use this free path instead
    Rename(PathBuf),
}

/// Compares content and finds alternate names
#[derive(Debug, Clone)]
pub struct DuplicateResolver {
    hasher: ContentHasher,
    max_attempts: Option<u32>,
}

impl DuplicateResolver {
    pub fn new() -> Self {
        Self {
            hasher: ContentHasher::new(),
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
        }
    }

    /// Cap the number of `_n` probes (`None` = probe forever)
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Decide between skipping `source` and renaming it.
    ///
    /// `occupied` must be an existing destination path.
    pub fn resolve(&self, source: &Path, occupied: &Path) -> Result<Resolution, CollisionError> {
        let incoming = self.hasher.hash_file(source)?;
        let existing = self.hasher.hash_file(occupied)?;

        if incoming == existing {
            debug!(hash = %incoming, "content matches existing file");
            return Ok(Resolution::Duplicate);
        }

        self.next_free_path(occupied).map(Resolution::Rename)
    }

    /// First `{stem}_{n}{.ext}` next to `occupied` that does not exist
    pub fn next_free_path(&self, occupied: &Path) -> Result<PathBuf, CollisionError> {
        let mut counter: u32 = 1;
        loop {
            if let Some(max) = self.max_attempts {
                if counter > max {
                    return Err(CollisionError::Exhausted {
                        path: occupied.to_path_buf(),
                        attempts: max,
                    });
                }
            }

            let candidate = numbered_path(occupied, counter);
            if !candidate.exists() {
                return Ok(candidate);
            }
            counter = counter.saturating_add(1);
        }
    }
}

impl Default for DuplicateResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// `dir/IMG.jpg` + 2 -> `dir/IMG_2.jpg`
pub fn numbered_path(path: &Path, counter: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("file"));

    let mut name = stem;
    name.push(format!("_{}", counter));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }

    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn numbered_path_keeps_extension() {
        assert_eq!(
            numbered_path(Path::new("/dest/2024/photo.jpg"), 1),
            PathBuf::from("/dest/2024/photo_1.jpg")
        );
        assert_eq!(
            numbered_path(Path::new("/dest/2024/archive.tar.PNG"), 3),
            PathBuf::from("/dest/2024/archive.tar_3.PNG")
        );
        assert_eq!(
            numbered_path(Path::new("/dest/2024/noext"), 2),
            PathBuf::from("/dest/2024/noext_2")
        );
    }

    #[test]
    fn identical_content_is_a_duplicate() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("in.jpg");
        let occupied = dir.path().join("out.jpg");
        fs::write(&source, b"same bytes").unwrap();
        fs::write(&occupied, b"same bytes").unwrap();

        let resolution = DuplicateResolver::new().resolve(&source, &occupied).unwrap();
        assert_eq!(resolution, Resolution::Duplicate);
    }

    #[test]
    fn different_content_gets_first_free_counter() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src.jpg");
        let occupied = dir.path().join("photo.jpg");
        fs::write(&source, b"new").unwrap();
        fs::write(&occupied, b"old").unwrap();
        fs::write(dir.path().join("photo_1.jpg"), b"older").unwrap();

        let resolution = DuplicateResolver::new().resolve(&source, &occupied).unwrap();
        assert_eq!(resolution, Resolution::Rename(dir.path().join("photo_2.jpg")));
    }

    #[test]
    fn numbered_slot_with_same_content_is_not_rechecked() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src.jpg");
        let occupied = dir.path().join("photo.jpg");
        fs::write(&source, b"new").unwrap();
        fs::write(&occupied, b"old").unwrap();
        fs::write(dir.path().join("photo_1.jpg"), b"new").unwrap();

        let resolution = DuplicateResolver::new().resolve(&source, &occupied).unwrap();
        assert_eq!(resolution, Resolution::Rename(dir.path().join("photo_2.jpg")));
    }

    #[test]
    fn probing_stops_at_the_cap() {
        let dir = TempDir::new().unwrap();
        let occupied = dir.path().join("photo.jpg");
        fs::write(&occupied, b"x").unwrap();
        for n in 1..=3 {
            fs::write(numbered_path(&occupied, n), b"x").unwrap();
        }

        let capped = DuplicateResolver::new().with_max_attempts(Some(3));
        assert!(matches!(
            capped.next_free_path(&occupied),
            Err(CollisionError::Exhausted { attempts: 3, .. })
        ));

        let unbounded = DuplicateResolver::new().with_max_attempts(None);
        assert_eq!(
            unbounded.next_free_path(&occupied).unwrap(),
            dir.path().join("photo_4.jpg")
        );
    }

    #[test]
    fn unreadable_occupant_is_a_hash_error() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src.jpg");
        fs::write(&source, b"x").unwrap();

        let result = DuplicateResolver::new().resolve(&source, &dir.path().join("missing.jpg"));
        assert!(matches!(result, Err(CollisionError::Hash(_))));
    }
}
