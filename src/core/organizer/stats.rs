//! Per-run counters.

use serde::{Deserialize, Serialize};

/// Summary of one `organize` call.
///
/// Created fresh for every run and handed back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Candidate files seen, whatever happened to them
    pub total_processed: usize,
    /// Files skipped because identical content was already in place
    pub duplicates_found: usize,
    /// Files copied under their own name
    pub copied: usize,
    /// Files copied under a `_n` name
    pub renamed: usize,
    /// Files left in place because no date could be found
    pub no_date: usize,
    /// Files that could not be placed
    pub failed: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl RunStats {
    /// Files that now have a copy in the destination tree
    pub fn placed(&self) -> usize {
        self.copied + self.renamed
    }
}
