//! Completeness check run before any verse page is written.
//!
//! A dataset that validates structurally can still be badly truncated (a
//! half-finished ingestion, a wrong input file). The guard compares the
//! indexed verse count with a configured minimum; below it, the build writes
//! only its diagnostics and fails so the output is never deployed.

use crate::config::GuardConfig;

/// Outcome of comparing the indexed verse count against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardReport {
    pub actual: usize,
    pub expected: usize,
    pub minimum: usize,
}

impl GuardReport {
    pub fn passed(&self) -> bool {
        self.actual >= self.minimum
    }

    /// Verses missing relative to the full canon (zero when at or above it).
    pub fn shortfall(&self) -> usize {
        self.expected.saturating_sub(self.actual)
    }
}

impl std::fmt::Display for GuardReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} verses indexed, minimum {} (expected {})",
            self.actual, self.minimum, self.expected
        )
    }
}

pub fn check(actual: usize, config: &GuardConfig) -> GuardReport {
    GuardReport {
        actual,
        expected: config.expected_verses,
        minimum: config.minimum_verses,
    }
}
