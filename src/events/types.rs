//! Event type definitions for progress reporting.

use crate::core::date::DateSource;
use crate::core::organizer::RunStats;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a presentation layer should treat an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Header,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Header => write!(f, "header"),
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// All events emitted by the organizer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A run has started
    Started {
        run_id: String,
        source: PathBuf,
        destination: PathBuf,
    },
    /// A file was copied into its date folder under its own name
    Placed {
        source: PathBuf,
        destination: PathBuf,
        date_source: DateSource,
    },
    /// A file was copied under a `_N` name because its slot was taken
    Renamed {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Byte-identical content already exists at the destination
    Duplicate { source: PathBuf, existing: PathBuf },
    /// No date could be determined; the file was left where it is
    NoDate { path: PathBuf },
    /// Placing a single file failed; the run continues
    Failed { path: PathBuf, message: String },
    /// The source root does not exist; nothing was done
    SourceMissing { path: PathBuf },
    /// The run finished
    Completed { stats: RunStats },
}

impl Event {
    /// Presentation class for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::Started { .. } | Event::Completed { .. } => Severity::Header,
            Event::Placed { .. } | Event::Renamed { .. } => Severity::Success,
            Event::Duplicate { .. } | Event::NoDate { .. } => Severity::Warning,
            Event::Failed { .. } | Event::SourceMissing { .. } => Severity::Error,
        }
    }

    /// One-line human description
    pub fn message(&self) -> String {
        match self {
            Event::Started {
                source,
                destination,
                ..
            } => format!(
                "Organizing {} into {}",
                source.display(),
                destination.display()
            ),
            Event::Placed {
                source,
                destination,
                date_source,
            } => format!(
                "Copied {} -> {} (date from {})",
                file_label(source),
                destination.display(),
                date_source
            ),
            Event::Renamed {
                source,
                destination,
            } => format!(
                "Copied {} -> {} (name was taken)",
                file_label(source),
                destination.display()
            ),
            Event::Duplicate { source, existing } => format!(
                "Skipped {}: identical to {}",
                file_label(source),
                existing.display()
            ),
            Event::NoDate { path } => {
                format!("Skipped {}: could not determine a date", path.display())
            }
            Event::Failed { path, message } => {
                format!("Failed {}: {}", path.display(), message)
            }
            Event::SourceMissing { path } => {
                format!("Source directory does not exist: {}", path.display())
            }
            Event::Completed { stats } => format!(
                "Processed {} files, {} duplicates found",
                stats.total_processed, stats.duplicates_found
            ),
        }
    }
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_follow_outcome() {
        let placed = Event::Placed {
            source: PathBuf::from("/in/a.jpg"),
            destination: PathBuf::from("/out/2024/01-January/a.jpg"),
            date_source: DateSource::Metadata,
        };
        let dup = Event::Duplicate {
            source: PathBuf::from("/in/a.jpg"),
            existing: PathBuf::from("/out/2024/01-January/a.jpg"),
        };
        let failed = Event::Failed {
            path: PathBuf::from("/in/a.jpg"),
            message: "denied".to_string(),
        };

        assert_eq!(placed.severity(), Severity::Success);
        assert_eq!(dup.severity(), Severity::Warning);
        assert_eq!(failed.severity(), Severity::Error);
        assert_eq!(
            Event::Completed {
                stats: RunStats::default()
            }
            .severity(),
            Severity::Header
        );
    }

    #[test]
    fn events_are_serializable() {
        let event = Event::Duplicate {
            source: PathBuf::from("/in/a.jpg"),
            existing: PathBuf::from("/out/a.jpg"),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"duplicate\""));

        let back: Event = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, Event::Duplicate { .. }));
    }

    #[test]
    fn completed_message_reports_counters() {
        let stats = RunStats {
            total_processed: 12,
            duplicates_found: 3,
            ..Default::default()
        };
        let message = Event::Completed { stats }.message();
        assert!(message.contains("12 files"));
        assert!(message.contains("3 duplicates"));
    }
}
