//! # Organizer Module
//!
//! Walks the source tree and copies every candidate photo into
//! `{destination}/{YYYY}/{MM}-{Month}/`.
//!
//! ## Per-file outcome
//! - no date → left where it is
//! - free slot → copied with attributes preserved
//! - same content already in the slot → skipped, counted as a duplicate
//! - different content in the slot → copied as `{stem}_{n}{.ext}`
//!
//! A failure on one file is reported and the run moves on. Only a missing
//! source directory stops the run, before anything is written.

mod stats;

pub use stats::RunStats;

use crate::core::collision::{DuplicateResolver, Resolution};
use crate::core::config::absolutize;
use crate::core::copier::{FileCopier, FsCopier};
use crate::core::date::{DateResolver, DateSource};
use crate::core::scanner::{FileWalker, ScanConfig, WalkDirScanner};
use crate::error::{OrganizerError, ScanError};
use crate::events::{null_sender, Event, EventSender};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

/// Source and destination roots for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeRequest {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl OrganizeRequest {
    /// Build a request, expanding `~` and making both roots absolute
    pub fn new(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            source: absolutize(source.as_ref())?,
            destination: absolutize(destination.as_ref())?,
        })
    }
}

/// What happened to a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Copied to its natural slot
    Copied {
        destination: PathBuf,
        date_source: DateSource,
    },
    /// Copied to a numbered slot
    Renamed { destination: PathBuf },
    /// Same content already at `existing`
    Duplicate { existing: PathBuf },
    /// No date could be determined
    NoDate,
}

/// Builder for [`Organizer`]
pub struct OrganizerBuilder {
    walker: Option<Box<dyn FileWalker>>,
    scan_config: ScanConfig,
    dates: DateResolver,
    resolver: DuplicateResolver,
    copier: Option<Box<dyn FileCopier>>,
    events: Option<EventSender>,
}

impl OrganizerBuilder {
    pub fn new() -> Self {
        Self {
            walker: None,
            scan_config: ScanConfig::default(),
            dates: DateResolver::new(),
            resolver: DuplicateResolver::new(),
            copier: None,
            events: None,
        }
    }

    /// Configure the default walkdir-based walker
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.scan_config = config;
        self
    }

    /// Replace the file walker entirely
    pub fn walker(mut self, walker: Box<dyn FileWalker>) -> Self {
        self.walker = Some(walker);
        self
    }

    /// Cap `_n` probing (`None` = unbounded)
    pub fn max_collision_attempts(mut self, max: Option<u32>) -> Self {
        self.resolver = self.resolver.with_max_attempts(max);
        self
    }

    pub fn copier(mut self, copier: Box<dyn FileCopier>) -> Self {
        self.copier = Some(copier);
        self
    }

    /// Where progress events go
    pub fn events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Organizer {
        Organizer {
            walker: self
                .walker
                .unwrap_or_else(|| Box::new(WalkDirScanner::new(self.scan_config))),
            dates: self.dates,
            resolver: self.resolver,
            copier: self.copier.unwrap_or_else(|| Box::new(FsCopier::new())),
            events: self.events.unwrap_or_else(null_sender),
        }
    }
}

impl Default for OrganizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorts photos into dated folders
pub struct Organizer {
    walker: Box<dyn FileWalker>,
    dates: DateResolver,
    resolver: DuplicateResolver,
    copier: Box<dyn FileCopier>,
    events: EventSender,
}

impl Organizer {
    pub fn builder() -> OrganizerBuilder {
        OrganizerBuilder::new()
    }

    /// Organize every candidate under `request.source`.
    ///
    /// Fails only when the source root is missing; per-file problems are
    /// counted in the returned stats and reported as events.
    pub fn organize(&self, request: &OrganizeRequest) -> Result<RunStats, OrganizerError> {
        let start = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("organize", run_id = %run_id);
        let _guard = span.enter();

        let scan = match self.walker.walk(&request.source) {
            Ok(scan) => scan,
            Err(e) => {
                error!("{}", e);
                self.events.send(Event::SourceMissing {
                    path: request.source.clone(),
                });
                return Err(e.into());
            }
        };

        info!(
            source = %request.source.display(),
            destination = %request.destination.display(),
            candidates = scan.photos.len(),
            "starting run"
        );
        self.events.send(Event::Started {
            run_id: run_id.clone(),
            source: request.source.clone(),
            destination: request.destination.clone(),
        });

        for scan_error in &scan.errors {
            self.events.send(Event::Failed {
                path: scan_error.path().to_path_buf(),
                message: scan_error.to_string(),
            });
        }

        let mut stats = RunStats::default();

        for photo in &scan.photos {
            stats.total_processed += 1;
            let source = &photo.path;

            match self.place(source, &request.destination) {
                Ok(Outcome::Copied {
                    destination,
                    date_source,
                }) => {
                    stats.copied += 1;
                    info!("Copied {} to {}", source.display(), destination.display());
                    self.events.send(Event::Placed {
                        source: source.clone(),
                        destination,
                        date_source,
                    });
                }
                Ok(Outcome::Renamed { destination }) => {
                    stats.renamed += 1;
                    info!(
                        "Name taken, copied {} to {}",
                        source.display(),
                        destination.display()
                    );
                    self.events.send(Event::Renamed {
                        source: source.clone(),
                        destination,
                    });
                }
                Ok(Outcome::Duplicate { existing }) => {
                    stats.duplicates_found += 1;
                    info!(
                        "Duplicate found: {} matches {}",
                        source.display(),
                        existing.display()
                    );
                    self.events.send(Event::Duplicate {
                        source: source.clone(),
                        existing,
                    });
                }
                Ok(Outcome::NoDate) => {
                    stats.no_date += 1;
                    warn!("Could not determine date for {}", source.display());
                    self.events.send(Event::NoDate {
                        path: source.clone(),
                    });
                }
                Err(e) => {
                    stats.failed += 1;
                    error!("Error processing {}: {}", source.display(), e);
                    self.events.send(Event::Failed {
                        path: source.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            total_processed = stats.total_processed,
            duplicates_found = stats.duplicates_found,
            copied = stats.copied,
            renamed = stats.renamed,
            no_date = stats.no_date,
            failed = stats.failed,
            "run complete"
        );
        self.events.send(Event::Completed {
            stats: stats.clone(),
        });

        Ok(stats)
    }

    /// Place one file under `destination_root`
    pub fn place(&self, source: &Path, destination_root: &Path) -> Result<Outcome, OrganizerError> {
        let date = match self.dates.resolve(source) {
            Some(date) => date,
            None => return Ok(Outcome::NoDate),
        };

        let folder = destination_root.join(date.folder());
        self.copier.ensure_dir(&folder)?;

        let file_name = source.file_name().ok_or_else(|| {
            OrganizerError::Config(format!("{} has no file name", source.display()))
        })?;
        let target = folder.join(file_name);

        if !target.exists() {
            self.copier.copy(source, &target)?;
            return Ok(Outcome::Copied {
                destination: target,
                date_source: date.source,
            });
        }

        match self.resolver.resolve(source, &target)? {
            Resolution::Duplicate => Ok(Outcome::Duplicate { existing: target }),
            Resolution::Rename(alternate) => {
                self.copier.copy(source, &alternate)?;
                Ok(Outcome::Renamed {
                    destination: alternate,
                })
            }
        }
    }
}
