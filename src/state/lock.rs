//! File locking and atomic writes for state files.

use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{AssetCheckError, Result};

pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

const LOCK_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug)]
pub enum LockError {
    Timeout,
    Io(io::Error),
}

impl From<io::Error> for LockError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl std::fmt::Display for LockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "lock acquisition timed out"),
            Self::Io(e) => write!(f, "lock I/O error: {e}"),
        }
    }
}

impl std::error::Error for LockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timeout => None,
            Self::Io(e) => Some(e),
        }
    }
}

fn poll_lock(
    timeout_ms: u64,
    mut attempt: impl FnMut() -> std::result::Result<(), TryLockError>,
) -> std::result::Result<(), LockError> {
    let start = Instant::now();
    let timeout = Duration::from_millis(timeout_ms);
    let poll_interval = Duration::from_millis(LOCK_POLL_INTERVAL_MS);

    loop {
        match attempt() {
            Ok(()) => return Ok(()),
            Err(TryLockError::WouldBlock) => {
                if start.elapsed() >= timeout {
                    return Err(LockError::Timeout);
                }
                thread::sleep(poll_interval);
            }
            Err(TryLockError::Error(e)) => return Err(LockError::Io(e)),
        }
    }
}

/// Acquire an exclusive lock on `file`, polling until `timeout_ms` elapses.
///
/// # Errors
/// [`LockError::Timeout`] when the lock stays busy, [`LockError::Io`] otherwise.
pub fn try_lock_exclusive_with_timeout(
    file: &File,
    timeout_ms: u64,
) -> std::result::Result<(), LockError> {
    poll_lock(timeout_ms, || file.try_lock())
}

/// Acquire a shared lock on `file`, polling until `timeout_ms` elapses.
///
/// # Errors
/// [`LockError::Timeout`] when the lock stays busy, [`LockError::Io`] otherwise.
pub fn try_lock_shared_with_timeout(
    file: &File,
    timeout_ms: u64,
) -> std::result::Result<(), LockError> {
    poll_lock(timeout_ms, || file.try_lock_shared())
}

/// Unlock failures are ignored.
pub fn unlock_file(file: &File) {
    let _ = file.unlock();
}

/// Shared lock released on drop.
///
/// Acquisition failures are logged and the read proceeds unlocked.
pub struct SharedLockGuard<'a> {
    file: Option<&'a File>,
}

impl<'a> SharedLockGuard<'a> {
    #[must_use]
    pub fn try_acquire(file: &'a File, timeout_ms: u64, what: &str, path: &Path) -> Self {
        match try_lock_shared_with_timeout(file, timeout_ms) {
            Ok(()) => Self { file: Some(file) },
            Err(e) => {
                tracing::warn!(
                    target: crate::LOG_TARGET,
                    path = %path.display(),
                    "Reading {what} without a lock: {e}"
                );
                Self { file: None }
            }
        }
    }
}

impl Drop for SharedLockGuard<'_> {
    fn drop(&mut self) {
        if let Some(file) = self.file {
            unlock_file(file);
        }
    }
}

/// Whether a save reached the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Another writer held the lock past the timeout; nothing was written.
    Skipped,
}

/// Write `bytes` to `path` through a temp file and rename, holding an
/// exclusive lock on `<path>.lock` for the rename.
///
/// The previous file is left intact on any failure.
///
/// # Errors
/// Returns an error if the temp file cannot be written or renamed. A lock
/// timeout is not an error: it yields [`SaveOutcome::Skipped`].
pub fn atomic_write_with_lock(path: &Path, bytes: &[u8], what: &str) -> Result<SaveOutcome> {
    atomic_write_with_timeout(path, bytes, what, DEFAULT_LOCK_TIMEOUT_MS)
}

pub(crate) fn atomic_write_with_timeout(
    path: &Path,
    bytes: &[u8],
    what: &str,
    timeout_ms: u64,
) -> Result<SaveOutcome> {
    let file_access = |path: &Path| {
        let path = path.to_path_buf();
        move |source| AssetCheckError::FileAccess { path, source }
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(file_access(parent))?;
    }

    let temp_path = sibling(path, "tmp");
    write_file(&temp_path, bytes).map_err(file_access(&temp_path))?;

    let lock_path = sibling(path, "lock");
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(file_access(&lock_path))?;

    match try_lock_exclusive_with_timeout(&lock_file, timeout_ms) {
        Ok(()) => {}
        Err(LockError::Timeout) => {
            let _ = fs::remove_file(&temp_path);
            tracing::warn!(
                target: crate::LOG_TARGET,
                path = %path.display(),
                "Skipped saving {what}: lock timed out"
            );
            return Ok(SaveOutcome::Skipped);
        }
        Err(LockError::Io(source)) => {
            let _ = fs::remove_file(&temp_path);
            return Err(AssetCheckError::FileAccess {
                path: lock_path,
                source,
            });
        }
    }

    let renamed = fs::rename(&temp_path, path);
    unlock_file(&lock_file);
    renamed.map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        AssetCheckError::FileAccess {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(SaveOutcome::Saved)
}

fn sibling(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(extension);
    path.with_file_name(name)
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
