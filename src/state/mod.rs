//! Persisted session state.
//!
//! The last results, filters and icon style survive across sessions in a
//! JSON file under the project's state directory: `Library/asset-checker/`
//! when the project has a `Library` directory, `.asset-checker/` otherwise.

mod lock;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::checker::{AssetCheckResult, CheckResultStats, CheckerRef, ResultTypeMask};
use crate::error::{AssetCheckError, Result};
use crate::filter::CategoryFilter;
use crate::view::ResultIconStyle;

pub use lock::{
    DEFAULT_LOCK_TIMEOUT_MS, LockError, SaveOutcome, SharedLockGuard, atomic_write_with_lock,
    try_lock_exclusive_with_timeout, try_lock_shared_with_timeout, unlock_file,
};

const STATE_DIR_NAME: &str = "asset-checker";
const HOST_STATE_DIR: &str = "Library";
const FALLBACK_STATE_DIR: &str = ".asset-checker";
const STATE_FILENAME: &str = "state.json";

/// Directory that holds state files for `project_root`.
#[must_use]
pub fn detect_state_dir(project_root: &Path) -> PathBuf {
    let library = project_root.join(HOST_STATE_DIR);
    if library.is_dir() {
        library.join(STATE_DIR_NAME)
    } else {
        project_root.join(FALLBACK_STATE_DIR)
    }
}

#[must_use]
pub fn state_path(project_root: &Path) -> PathBuf {
    detect_state_dir(project_root).join(STATE_FILENAME)
}

/// A result as written to disk.
///
/// The live checker cannot be serialized, so its name is stored instead and
/// rebound against the active settings on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCheckResult {
    #[serde(flatten)]
    pub result: AssetCheckResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checker: Option<String>,
}

impl StoredCheckResult {
    #[must_use]
    pub fn capture(result: &AssetCheckResult) -> Self {
        Self {
            checker: result.checker_name().map(str::to_string),
            result: result.clone(),
        }
    }

    /// Rebuild the live record, looking the checker up by name.
    ///
    /// A name that no longer resolves leaves the record without a checker,
    /// so it can be displayed but not rechecked.
    #[must_use]
    pub fn restore(self, lookup: impl Fn(&str) -> Option<CheckerRef>) -> AssetCheckResult {
        let mut result = self.result;
        result.checker = self.checker.as_deref().and_then(lookup);
        result
    }
}

/// Everything a session persists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub settings_path: Option<PathBuf>,
    pub profile: Option<String>,
    pub stats: CheckResultStats,
    pub results: Vec<StoredCheckResult>,
    pub type_filter: ResultTypeMask,
    pub category_filter: CategoryFilter,
    pub icon_style: ResultIconStyle,
}

/// JSON-backed store for [`SessionState`].
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(state_path(project_root))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved state; a missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<SessionState> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SessionState::default()),
            Err(source) => {
                return Err(AssetCheckError::FileAccess {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let _guard =
            SharedLockGuard::try_acquire(&file, DEFAULT_LOCK_TIMEOUT_MS, "state file", &self.path);
        let state = serde_json::from_reader(BufReader::new(&file))?;
        Ok(state)
    }

    /// # Errors
    /// Returns an error if the state cannot be serialized or written.
    #[must_use = "check if save was skipped due to lock timeout"]
    pub fn save(&self, state: &SessionState) -> Result<SaveOutcome> {
        let json = serde_json::to_string_pretty(state)?;
        atomic_write_with_lock(&self.path, json.as_bytes(), "state file")
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
