//! Checkers shipped with the crate for projects stored on disk.
//!
//! - `file-size`: flags files above a warning/error byte threshold.
//! - `line-endings`: flags CRLF line endings and a missing final newline in
//!   text assets, and can repair both.

mod file_size;
mod line_endings;

pub use file_size::{FileSizeChecker, FileSizeOptions};
pub use line_endings::{LineEndingsChecker, LineEndingsOptions};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::CheckerRegistry;
use crate::asset::AssetRef;
use crate::error::CheckerError;

pub const FILE_SIZE: &str = "file-size";
pub const LINE_ENDINGS: &str = "line-endings";

/// Options for the built-in checkers, read from `[checker_options]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinCheckerOptions {
    #[serde(default, rename = "file-size")]
    pub file_size: FileSizeOptions,

    #[serde(default, rename = "line-endings")]
    pub line_endings: LineEndingsOptions,
}

/// On-disk location of `asset` under `root`.
///
/// Paths that escape the project are rejected so a repair can never write
/// outside it.
fn project_file(root: &Path, asset: &AssetRef) -> Result<PathBuf, CheckerError> {
    if asset.is_confined() {
        Ok(root.join(asset.path()))
    } else {
        Err(CheckerError::InvalidAsset(format!(
            "{} lies outside the project",
            asset.path()
        )))
    }
}

/// Register every built-in checker for the project at `root`.
pub fn register_builtin(
    registry: &mut CheckerRegistry,
    root: &Path,
    options: &BuiltinCheckerOptions,
) {
    registry.register(FileSizeChecker::new(root, options.file_size.clone()));
    registry.register(LineEndingsChecker::new(root, options.line_endings.clone()));
}
