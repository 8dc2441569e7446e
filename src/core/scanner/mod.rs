//! # Scanner Module
//!
//! Discovers candidate photo files under the source root.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - GIF (.gif)
//! - BMP (.bmp)
//! - TIFF (.tiff)
//! - WebP (.webp)
//!
//! Extensions are matched case-insensitively. Anything else is never touched.

mod filter;
mod walker;

pub use filter::{ImageFilter, SUPPORTED_EXTENSIONS};
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use image::ImageFormat;
use std::path::{Path, PathBuf};

/// A discovered candidate file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    /// Path to the file
    pub path: PathBuf,
    /// Format implied by the extension
    pub format: Option<ImageFormat>,
}

/// Result of a walk
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Candidate files in walk order
    pub photos: Vec<PhotoFile>,
    /// Entries that could not be read (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Enumerates candidate files under a root directory.
///
/// Implement this trait to feed the organizer from somewhere other than
/// the real filesystem walk (e.g., for testing).
pub trait FileWalker: Send + Sync {
    /// Walk `root` and return every candidate file beneath it
    fn walk(&self, root: &Path) -> Result<ScanResult, ScanError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedWalker(Vec<PathBuf>);

    impl FileWalker for FixedWalker {
        fn walk(&self, _root: &Path) -> Result<ScanResult, ScanError> {
            Ok(ScanResult {
                photos: self
                    .0
                    .iter()
                    .map(|p| PhotoFile {
                        path: p.clone(),
                        format: ImageFormat::from_path(p).ok(),
                    })
                    .collect(),
                errors: Vec::new(),
            })
        }
    }

    #[test]
    fn walker_is_object_safe() {
        let walker: Box<dyn FileWalker> =
            Box::new(FixedWalker(vec![PathBuf::from("/in/a.PNG")]));
        let result = walker.walk(Path::new("/in")).unwrap();
        assert_eq!(result.photos.len(), 1);
        assert_eq!(result.photos[0].format, Some(ImageFormat::Png));
    }
}
