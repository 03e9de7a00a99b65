use serde::{Deserialize, Serialize};

use super::{AssetCheckResult, CheckResultType};

/// Per-type counters derived from a result list.
///
/// Never a source of truth: rebuild it with [`CheckResultStats::from_results`]
/// whenever the result list changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResultStats {
    pub all_pass: usize,
    pub not_important: usize,
    pub warning: usize,
    pub error: usize,
    pub exception: usize,
    /// Checker runs that reported no issue.
    pub null_result: usize,
}

impl CheckResultStats {
    #[must_use]
    pub fn from_results(results: &[AssetCheckResult], null_result_count: usize) -> Self {
        let mut stats = Self {
            null_result: null_result_count,
            ..Self::default()
        };
        for result in results {
            stats.record(result.result_type);
        }
        stats
    }

    pub const fn record(&mut self, result_type: CheckResultType) {
        match result_type {
            CheckResultType::AllPass => self.all_pass += 1,
            CheckResultType::NotImportant => self.not_important += 1,
            CheckResultType::Warning => self.warning += 1,
            CheckResultType::Error => self.error += 1,
            CheckResultType::Exception => self.exception += 1,
        }
    }

    #[must_use]
    pub const fn count(&self, result_type: CheckResultType) -> usize {
        match result_type {
            CheckResultType::AllPass => self.all_pass,
            CheckResultType::NotImportant => self.not_important,
            CheckResultType::Warning => self.warning,
            CheckResultType::Error => self.error,
            CheckResultType::Exception => self.exception,
        }
    }

    /// Number of visible results; null results are not included.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.all_pass + self.not_important + self.warning + self.error + self.exception
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
