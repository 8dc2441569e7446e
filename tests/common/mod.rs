//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{Local, TimeZone};
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::{Path, PathBuf};

/// Minimal JPEG carrying only an EXIF `DateTimeOriginal` of `datetime`
/// ("YYYY:MM:DD HH:MM:SS"). `tag` is appended after the image so
/// different tags give different bytes with the same date.
pub fn jpeg_with_capture_date(datetime: &str, tag: &[u8]) -> Vec<u8> {
    assert_eq!(datetime.len(), 19);

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2a\x00\x00\x00\x08");
    tiff.extend_from_slice(&[0x00, 0x01]);
    tiff.extend_from_slice(&[0x87, 0x69, 0x00, 0x04, 0x00, 0x00, 0x00, 0x01]);
    tiff.extend_from_slice(&26u32.to_be_bytes());
    tiff.extend_from_slice(&[0, 0, 0, 0]);
    tiff.extend_from_slice(&[0x00, 0x01]);
    tiff.extend_from_slice(&[0x90, 0x03, 0x00, 0x02, 0x00, 0x00, 0x00, 0x14]);
    tiff.extend_from_slice(&44u32.to_be_bytes());
    tiff.extend_from_slice(&[0, 0, 0, 0]);
    tiff.extend_from_slice(datetime.as_bytes());
    tiff.push(0);

    let mut app1 = b"Exif\x00\x00".to_vec();
    app1.extend_from_slice(&tiff);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
    jpeg.extend_from_slice(&app1);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg.extend_from_slice(tag);
    jpeg
}

/// Write `bytes` to `dir/name`, creating parents
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, bytes).unwrap();
    path
}

/// Set the modification time to noon local time on the given day
pub fn set_local_mtime(path: &Path, year: i32, month: u32, day: u32) {
    let local = Local.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();
    set_file_mtime(path, FileTime::from_unix_time(local.timestamp(), 0)).unwrap();
}

/// Every regular file under `root`, relative to it, sorted
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}
