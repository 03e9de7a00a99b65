use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::asset::{AssetKind, AssetRef};
use crate::checker::{AssetCheckResult, AssetChecker, CheckOutcome, CheckResultType};
use crate::error::CheckerError;

use super::FILE_SIZE;

const DEFAULT_WARN_BYTES: u64 = 1024 * 1024;
const DEFAULT_ERROR_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSizeOptions {
    #[serde(default = "default_warn_bytes")]
    pub warn_bytes: u64,

    #[serde(default = "default_error_bytes")]
    pub error_bytes: u64,

    /// Only check these kinds. Empty means every file.
    #[serde(default)]
    pub kinds: Vec<AssetKind>,
}

impl Default for FileSizeOptions {
    fn default() -> Self {
        Self {
            warn_bytes: DEFAULT_WARN_BYTES,
            error_bytes: DEFAULT_ERROR_BYTES,
            kinds: Vec::new(),
        }
    }
}

const fn default_warn_bytes() -> u64 {
    DEFAULT_WARN_BYTES
}

const fn default_error_bytes() -> u64 {
    DEFAULT_ERROR_BYTES
}

pub struct FileSizeChecker {
    root: PathBuf,
    options: FileSizeOptions,
}

impl FileSizeChecker {
    #[must_use]
    pub fn new(root: &Path, options: FileSizeOptions) -> Self {
        Self {
            root: root.to_path_buf(),
            options,
        }
    }

    fn applies_to(&self, asset: &AssetRef) -> bool {
        asset.is_project_asset()
            && !asset.is_folder()
            && (self.options.kinds.is_empty() || self.options.kinds.contains(&asset.kind()))
    }
}

impl AssetChecker for FileSizeChecker {
    fn name(&self) -> &str {
        FILE_SIZE
    }

    fn check_asset(&self, asset: &AssetRef) -> CheckOutcome {
        if !self.applies_to(asset) {
            return Ok(None);
        }

        let path = super::project_file(&self.root, asset)?;
        let size = fs::metadata(&path)
            .map_err(|source| CheckerError::Io { path, source })?
            .len();

        let (result_type, limit) = if size > self.options.error_bytes {
            (CheckResultType::Error, self.options.error_bytes)
        } else if size > self.options.warn_bytes {
            (CheckResultType::Warning, self.options.warn_bytes)
        } else {
            return Ok(None);
        };

        Ok(Some(
            AssetCheckResult::new(result_type, format!("File exceeds {limit} bytes"))
                .with_categories(["Size"])
                .with_details(format!(
                    "{} is {size} bytes; the limit is {limit} bytes.",
                    asset.path()
                ))
                .with_custom_view(FILE_SIZE, json!({ "size": size, "limit": limit })),
        ))
    }
}

#[cfg(test)]
#[path = "file_size_tests.rs"]
mod tests;
