pub mod builtin;
mod registry;
mod result;
mod stats;

pub use registry::CheckerRegistry;
pub use result::{AssetCheckResult, CheckResultType, EXCEPTION_CATEGORY, ResultTypeMask};
pub use stats::CheckResultStats;

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::asset::AssetRef;
use crate::error::CheckerError;

/// Outcome of one checker invocation: `Ok(None)` means "no issue found".
pub type CheckOutcome = std::result::Result<Option<AssetCheckResult>, CheckerError>;

/// What a repair attempt achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStatus {
    /// Every issue tracked by the result is resolved.
    AllRepaired,
    /// Some issues remain; the result has been updated to describe them.
    Partial,
}

impl RepairStatus {
    #[must_use]
    pub const fn all_issues_repaired(self) -> bool {
        matches!(self, Self::AllRepaired)
    }
}

pub trait AssetChecker {
    /// Stable name used to reference the checker from settings and stored results.
    fn name(&self) -> &str;

    /// Inspect a single asset without modifying it.
    ///
    /// Returns `Ok(None)` when the asset has no issue.
    ///
    /// # Errors
    /// Returns an error if the asset cannot be inspected.
    fn check_asset(&self, asset: &AssetRef) -> CheckOutcome;

    /// Attempt to repair the issues described by `result`, updating it in place.
    ///
    /// Partial repair must be reported as [`RepairStatus::Partial`].
    ///
    /// # Errors
    /// Returns an error if the repair fails. The default implementation
    /// rejects every repair.
    fn repair_asset(
        &self,
        result: &mut AssetCheckResult,
    ) -> std::result::Result<RepairStatus, CheckerError> {
        let _ = result;
        Err(CheckerError::RepairUnsupported(self.name().to_string()))
    }
}

/// Shared handle to a registered checker.
///
/// Equality is identity: two handles are equal only when they point at the
/// same checker instance, so a result can be re-checked by the exact
/// checker that produced it.
#[derive(Clone)]
pub struct CheckerRef(Rc<dyn AssetChecker>);

impl CheckerRef {
    pub fn new<C: AssetChecker + 'static>(checker: C) -> Self {
        Self(Rc::new(checker))
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Rc<dyn AssetChecker>> for CheckerRef {
    fn from(checker: Rc<dyn AssetChecker>) -> Self {
        Self(checker)
    }
}

impl Deref for CheckerRef {
    type Target = dyn AssetChecker;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl PartialEq for CheckerRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for CheckerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CheckerRef").field(&self.name()).finish()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
