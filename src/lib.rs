//! # Photo Organizer
//!
//! Copies loose photos into a `YYYY/MM-Month` tree, skipping true
//! duplicates and renaming name clashes.
//!
//! ## Core Philosophy
//! - **Never delete** - sources are copied, never moved or removed
//! - **Never overwrite** - an occupied name is either the same photo or gets a `_n` suffix
//! - **Keep going** - one bad file never stops the run
//!
//! ## Architecture
//! - `core` - The organizing engine
//! - `events` - Structured progress events for any UI
//! - `error` - User-friendly error types

pub mod core;
pub mod error;
pub mod events;

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
mod test_fixtures;

// Re-export commonly used types at the crate root
pub use error::{OrganizerError, Result};

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing to an append-only log file
///
/// This should be called once by the application entry point. Keep the
/// returned guard alive until exit so buffered lines are flushed.
pub fn init_logging(log_path: &Path) -> Result<WorkerGuard> {
    let dir = match log_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = log_path
        .file_name()
        .ok_or_else(|| OrganizerError::Logging(format!("{} is not a file", log_path.display())))?;

    std::fs::create_dir_all(dir)
        .map_err(|e| OrganizerError::Logging(format!("{}: {}", dir.display(), e)))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init()
        .map_err(|e| OrganizerError::Logging(e.to_string()))?;

    Ok(guard)
}
