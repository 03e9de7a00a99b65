//! Check execution: provider → checkers → result records.
//!
//! Every checker call is isolated at the (asset, checker) granularity. A
//! checker that returns an error or panics yields an `Exception` record for
//! that pair, and the batch carries on with the next pair.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::asset::AssetRef;
use crate::checker::{AssetCheckResult, CheckResultStats, CheckerRef, RepairStatus};
use crate::error::{AssetCheckError, CheckerError, Result};
use crate::provider::AssetProvider;

/// Status of a finished [`execute`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Success,
    /// Configuration was invalid; nothing was checked.
    Failure,
    /// The provider returned no assets.
    NoAssets,
}

impl From<&Result<ExecutionReport>> for ExecutionStatus {
    fn from(result: &Result<ExecutionReport>) -> Self {
        result.as_ref().map_or(Self::Failure, |report| report.status)
    }
}

#[derive(Debug)]
pub struct ExecutionReport {
    pub status: ExecutionStatus,
    /// Non-null results in asset-major, checker-minor order.
    pub results: Vec<AssetCheckResult>,
    /// Pairs whose checker reported no issue.
    pub null_result_count: usize,
    /// Empty slots in the checker list that were skipped.
    pub null_checker_count: usize,
}

impl ExecutionReport {
    fn empty(status: ExecutionStatus) -> Self {
        Self {
            status,
            results: Vec::new(),
            null_result_count: 0,
            null_checker_count: 0,
        }
    }

    #[must_use]
    pub fn stats(&self) -> CheckResultStats {
        CheckResultStats::from_results(&self.results, self.null_result_count)
    }
}

/// Run every checker against every asset from `provider`.
///
/// `None` entries in `checkers` are skipped and reported once with a single
/// warning after the batch.
///
/// # Errors
/// Returns [`AssetCheckError::MissingProvider`] or
/// [`AssetCheckError::NoCheckers`] before touching any asset, or the
/// provider's own error if it cannot enumerate assets.
pub fn execute(
    provider: Option<&dyn AssetProvider>,
    checkers: &[Option<CheckerRef>],
) -> Result<ExecutionReport> {
    let Some(provider) = provider else {
        tracing::error!(target: crate::LOG_TARGET, "Asset provider not specified");
        return Err(AssetCheckError::MissingProvider);
    };
    if checkers.is_empty() {
        tracing::error!(target: crate::LOG_TARGET, "Asset checkers not specified");
        return Err(AssetCheckError::NoCheckers);
    }

    let assets = provider.get_assets().inspect_err(|e| {
        tracing::error!(target: crate::LOG_TARGET, "Failed to collect assets: {e}");
    })?;
    if assets.is_empty() {
        tracing::warn!(target: crate::LOG_TARGET, "No asset to check");
        return Ok(ExecutionReport::empty(ExecutionStatus::NoAssets));
    }

    let mut report = ExecutionReport::empty(ExecutionStatus::Success);
    for asset in &assets {
        for slot in checkers {
            let Some(checker) = slot else {
                report.null_checker_count += 1;
                continue;
            };
            match check_pair(asset, checker) {
                Some(result) => report.results.push(result),
                None => report.null_result_count += 1,
            }
        }
    }

    if report.null_checker_count > 0 {
        tracing::warn!(
            target: crate::LOG_TARGET,
            skipped = report.null_checker_count,
            "Checker list contains empty entries; they were skipped"
        );
    }

    Ok(report)
}

fn check_pair(asset: &AssetRef, checker: &CheckerRef) -> Option<AssetCheckResult> {
    match isolate(|| checker.check_asset(asset)) {
        Ok(Some(mut result)) => {
            result.asset.get_or_insert_with(|| asset.clone());
            result.checker.get_or_insert_with(|| checker.clone());
            Some(result)
        }
        Ok(None) => None,
        Err(error) => {
            log_failure("check", asset, checker, &error);
            Some(AssetCheckResult::from_failure(
                &error,
                asset.clone(),
                checker.clone(),
            ))
        }
    }
}

/// Outcome of re-running the checker behind one record.
#[derive(Debug, Clone)]
pub enum RecheckOutcome {
    /// The checker no longer reports an issue.
    Resolved,
    /// Replacement for the old record.
    Updated(AssetCheckResult),
}

/// Re-run the checker that produced `record` against the same asset.
///
/// A failing checker yields an `Exception` record that keeps the old
/// `custom_data` but drops the custom view. Returns `None` when the record
/// has no (asset, checker) pair to re-run.
#[must_use]
pub fn recheck(record: &AssetCheckResult) -> Option<RecheckOutcome> {
    let (asset, checker) = record.asset.as_ref().zip(record.checker.as_ref())?;

    let outcome = match isolate(|| checker.check_asset(asset)) {
        Ok(Some(mut result)) => {
            result.asset.get_or_insert_with(|| asset.clone());
            result.checker.get_or_insert_with(|| checker.clone());
            RecheckOutcome::Updated(result)
        }
        Ok(None) => RecheckOutcome::Resolved,
        Err(error) => {
            log_failure("recheck", asset, checker, &error);
            let mut failed = AssetCheckResult::from_failure(&error, asset.clone(), checker.clone());
            failed.custom_data.clone_from(&record.custom_data);
            RecheckOutcome::Updated(failed)
        }
    };
    Some(outcome)
}

/// Outcome of a repair attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairOutcome {
    /// Every issue is fixed; the record should be removed.
    Repaired,
    /// Some issues remain; the record was updated in place.
    PartiallyRepaired,
    /// The repair failed; the record now describes the failure.
    Failed,
}

impl RepairOutcome {
    #[must_use]
    pub const fn all_issues_repaired(self) -> bool {
        matches!(self, Self::Repaired)
    }
}

/// Ask the record's checker to repair it.
///
/// On failure the record itself becomes an `Exception` record and stops
/// being repairable.
pub fn repair(record: &mut AssetCheckResult) -> RepairOutcome {
    let Some(checker) = record.checker.clone() else {
        record.mark_failed(&CheckerError::custom(
            "MissingChecker",
            "Check result has no checker to repair it",
        ));
        return RepairOutcome::Failed;
    };

    match isolate(|| checker.repair_asset(record)) {
        Ok(RepairStatus::AllRepaired) => RepairOutcome::Repaired,
        Ok(RepairStatus::Partial) => RepairOutcome::PartiallyRepaired,
        Err(error) => {
            if let Some(asset) = &record.asset {
                log_failure("repair", asset, &checker, &error);
            }
            record.mark_failed(&error);
            RepairOutcome::Failed
        }
    }
}

/// Run one checker call, turning a panic into [`CheckerError::Panicked`].
fn isolate<T>(
    call: impl FnOnce() -> std::result::Result<T, CheckerError>,
) -> std::result::Result<T, CheckerError> {
    panic::catch_unwind(AssertUnwindSafe(call))
        .unwrap_or_else(|payload| Err(CheckerError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn log_failure(operation: &str, asset: &AssetRef, checker: &CheckerRef, error: &CheckerError) {
    tracing::debug!(
        target: crate::LOG_TARGET,
        operation,
        asset = asset.path(),
        checker = checker.name(),
        kind = error.kind_name(),
        "{error}"
    );
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
