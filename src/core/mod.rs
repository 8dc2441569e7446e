//! # Core Module
//!
//! The GUI-agnostic organizing engine.
//!
//! ## Modules
//! - `scanner` - Finds candidate photos under the source root
//! - `date` - Picks the year/month a photo belongs to
//! - `hasher` - Content hashes for duplicate detection
//! - `collision` - Skips true duplicates, renames name clashes
//! - `copier` - Copies files with their attributes
//! - `organizer` - Orchestrates a run and counts the results
//! - `config` - Default locations and `~` expansion

pub mod collision;
pub mod config;
pub mod copier;
pub mod date;
pub mod hasher;
pub mod organizer;
pub mod scanner;

// Re-export commonly used types
pub use collision::{DuplicateResolver, Resolution};
pub use config::OrganizeConfig;
pub use date::{DateResolver, DateSource, PlacementDate};
pub use hasher::{ContentHash, ContentHasher};
pub use organizer::{OrganizeRequest, Organizer, Outcome, RunStats};
pub use scanner::{FileWalker, PhotoFile, ScanConfig, WalkDirScanner};
