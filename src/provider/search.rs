use std::rc::Rc;

use regex::Regex;

use crate::asset::{AssetDatabase, AssetRef, DEFAULT_SEARCH_FOLDER};
use crate::error::{AssetCheckError, Result};

use super::AssetProvider;

/// Queries the host asset index.
///
/// Paths returned by the index are kept when they match the include pattern
/// (if any) and do not match the exclude pattern (if any). Paths the index
/// cannot load are dropped, as are placeholder assets when
/// `ignore_default_assets` is set.
pub struct SearchAssetProvider {
    database: Rc<dyn AssetDatabase>,
    filter: String,
    folders: Vec<String>,
    include: Option<Regex>,
    exclude: Option<Regex>,
    ignore_default_assets: bool,
}

impl SearchAssetProvider {
    #[must_use]
    pub fn new(database: Rc<dyn AssetDatabase>, filter: impl Into<String>) -> Self {
        Self {
            database,
            filter: filter.into(),
            folders: vec![DEFAULT_SEARCH_FOLDER.to_string()],
            include: None,
            exclude: None,
            ignore_default_assets: false,
        }
    }

    /// Root folders to search. An empty list falls back to `Assets`.
    #[must_use]
    pub fn with_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let folders: Vec<String> = folders.into_iter().map(Into::into).collect();
        if !folders.is_empty() {
            self.folders = folders;
        }
        self
    }

    /// Keep only paths matching `pattern`. A blank pattern disables the check.
    ///
    /// # Errors
    /// Returns an error if `pattern` is not a valid regex.
    pub fn with_include(mut self, pattern: &str) -> Result<Self> {
        self.include = compile(pattern)?;
        Ok(self)
    }

    /// Drop paths matching `pattern`. A blank pattern disables the check.
    ///
    /// # Errors
    /// Returns an error if `pattern` is not a valid regex.
    pub fn with_exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude = compile(pattern)?;
        Ok(self)
    }

    #[must_use]
    pub const fn ignore_default_assets(mut self, ignore: bool) -> Self {
        self.ignore_default_assets = ignore;
        self
    }

    #[must_use]
    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    fn path_allowed(&self, path: &str) -> bool {
        self.include.as_ref().is_none_or(|re| re.is_match(path))
            && !self.exclude.as_ref().is_some_and(|re| re.is_match(path))
    }
}

impl AssetProvider for SearchAssetProvider {
    fn get_assets(&self) -> Result<Vec<AssetRef>> {
        let paths = self.database.find_assets(&self.filter, &self.folders)?;

        Ok(paths
            .iter()
            .filter(|path| self.path_allowed(path))
            .filter_map(|path| self.database.load_asset(path))
            .filter(|asset| !(self.ignore_default_assets && asset.kind().is_default_asset()))
            .collect())
    }
}

fn compile(pattern: &str) -> Result<Option<Regex>> {
    if pattern.trim().is_empty() {
        return Ok(None);
    }
    Regex::new(pattern)
        .map(Some)
        .map_err(|source| AssetCheckError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
