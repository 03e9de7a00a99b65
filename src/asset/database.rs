use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use walkdir::WalkDir;

use crate::error::{AssetCheckError, Result};

use super::{AssetDatabase, AssetKind, AssetRef, SearchFilter};

/// Asset database backed by a project directory on disk.
///
/// Asset paths are relative to the project root. Directories load as
/// [`AssetKind::Folder`], files by extension.
#[derive(Debug, Clone)]
pub struct FileSystemAssetDatabase {
    root: PathBuf,
}

impl FileSystemAssetDatabase {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a project asset.
    #[must_use]
    pub fn resolve(&self, asset: &AssetRef) -> Option<PathBuf> {
        (asset.is_project_asset() && asset.is_confined()).then(|| self.root.join(asset.path()))
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        (!parts.is_empty()).then(|| parts.join("/"))
    }

    fn scan_folder(&self, folder: &str, filter: &SearchFilter, found: &mut IndexSet<String>) {
        WalkDir::new(self.root.join(folder))
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let path = self.relative_path(entry.path())?;
                let kind = if entry.file_type().is_dir() {
                    AssetKind::Folder
                } else {
                    kind_of(&path)
                };
                filter.matches(&path, kind).then_some(path)
            })
            .for_each(|path| {
                found.insert(path);
            });
    }
}

impl AssetDatabase for FileSystemAssetDatabase {
    fn find_assets(&self, filter: &str, folders: &[String]) -> Result<Vec<String>> {
        let filter = SearchFilter::parse(filter)?;
        let mut found = IndexSet::new();

        for folder in folders {
            let folder = folder.trim_end_matches(['/', '\\']);
            if !self.root.join(folder).is_dir() {
                return Err(AssetCheckError::Config(format!(
                    "Search folder '{folder}' does not exist in {}",
                    self.root.display()
                )));
            }
            self.scan_folder(folder, &filter, &mut found);
        }

        Ok(found.into_iter().collect())
    }

    fn load_asset(&self, path: &str) -> Option<AssetRef> {
        if !AssetRef::project(path).is_confined() {
            return None;
        }
        let full = self.root.join(path);
        if full.is_dir() {
            Some(AssetRef::folder(path))
        } else if full.is_file() {
            Some(AssetRef::project(path))
        } else {
            None
        }
    }
}

fn kind_of(path: &str) -> AssetKind {
    AssetRef::project(path).kind()
}

#[cfg(test)]
#[path = "database_tests.rs"]
mod tests;
