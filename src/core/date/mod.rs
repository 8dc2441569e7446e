//! # Date Module
//!
//! Decides which year/month folder a photo belongs in.
//!
//! The capture time from EXIF `DateTimeOriginal` wins. When a file has no
//! readable EXIF (PNGs, screenshots, stripped exports) the filesystem
//! modification time is used instead, converted to local time.

use crate::error::DateError;
use chrono::{DateTime, Datelike, Local, NaiveDateTime};
use exif::{In, Reader, Tag, Value};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// EXIF date format: "YYYY:MM:DD HH:MM:SS"
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Where a placement date came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// EXIF DateTimeOriginal
    Metadata,
    /// Filesystem modification time
    Modified,
}

impl std::fmt::Display for DateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateSource::Metadata => write!(f, "EXIF"),
            DateSource::Modified => write!(f, "modification time"),
        }
    }
}

/// The date used to pick a destination folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementDate {
    pub taken: NaiveDateTime,
    pub source: DateSource,
}

impl PlacementDate {
    pub fn new(taken: NaiveDateTime, source: DateSource) -> Self {
        Self { taken, source }
    }

    pub fn year(&self) -> i32 {
        self.taken.year()
    }

    pub fn month(&self) -> u32 {
        self.taken.month()
    }

    /// Relative folder for this date, e.g. `2024/03-March`
    pub fn folder(&self) -> PathBuf {
        PathBuf::from(self.taken.format("%Y").to_string())
            .join(self.taken.format("%m-%B").to_string())
    }
}

/// Resolves placement dates for candidate files
#[derive(Debug, Clone, Copy, Default)]
pub struct DateResolver;

impl DateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Capture date, else modification date, else `None`.
    ///
    /// A missing or broken EXIF block is logged as a warning. Failing to
    /// stat the file is logged as an error.
    pub fn resolve(&self, path: &Path) -> Option<PlacementDate> {
        match Self::read_capture_date(path) {
            Ok(taken) => {
                debug!(path = %path.display(), %taken, "using EXIF capture date");
                return Some(PlacementDate::new(taken, DateSource::Metadata));
            }
            Err(e) => warn!("{}; falling back to modification time", e),
        }

        match Self::read_modified_date(path) {
            Ok(taken) => Some(PlacementDate::new(taken, DateSource::Modified)),
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }

    /// Read EXIF `DateTimeOriginal`
    pub fn read_capture_date(path: &Path) -> Result<NaiveDateTime, DateError> {
        let file = File::open(path).map_err(|source| DateError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);
        let exif = Reader::new()
            .read_from_container(&mut reader)
            .map_err(|e| DateError::NoExif {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let field = exif
            .get_field(Tag::DateTimeOriginal, In::PRIMARY)
            .ok_or_else(|| DateError::MissingTag {
                path: path.to_path_buf(),
            })?;

        let raw = match field.value {
            Value::Ascii(ref vec) => vec
                .first()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default(),
            _ => field.display_value().to_string(),
        };

        Self::parse_exif_datetime(&raw).ok_or_else(|| DateError::Unparsable {
            path: path.to_path_buf(),
            value: raw,
        })
    }

    /// Read the modification time as a local date
    pub fn read_modified_date(path: &Path) -> Result<NaiveDateTime, DateError> {
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|source| DateError::Stat {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(DateTime::<Local>::from(modified).naive_local())
    }

    fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim_end_matches('\0').trim();
        NaiveDateTime::parse_from_str(s, EXIF_DATETIME_FORMAT).ok()
    }
}
