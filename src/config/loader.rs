use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::error::{AssetCheckError, Result};

use super::filesystem::{FileSystem, RealFileSystem};
use super::model::{CONFIG_VERSION, SettingsConfig};

/// Settings file name looked up in the current directory.
pub const LOCAL_CONFIG_NAME: &str = "asset-checker.toml";
const USER_CONFIG_NAME: &str = "config.toml";

/// A loaded settings file and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    pub config: SettingsConfig,
    /// `None` when no settings file was found and defaults are used.
    pub path: Option<PathBuf>,
}

pub trait ConfigLoader {
    /// Load settings from the default locations.
    ///
    /// # Errors
    /// Returns an error if a settings file exists but cannot be read or parsed.
    fn load(&self) -> Result<LoadResult>;

    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    fn load_from_path(&self, path: &Path) -> Result<LoadResult>;
}

/// Loads settings from the filesystem.
///
/// Search order:
/// 1. `asset-checker.toml` in the current directory
/// 2. `config.toml` in the user config directory
/// 3. `SettingsConfig::default()`
#[derive(Debug, Default)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_config_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
    }

    /// Parse and validate settings text.
    ///
    /// # Errors
    /// Returns an error on malformed TOML, an unsupported version, or
    /// invalid profiles.
    pub fn parse_config(content: &str) -> Result<SettingsConfig> {
        let config: SettingsConfig = toml::from_str(content)?;
        validate_config_version(&config)?;
        validate_profiles(&config)?;
        Ok(config)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<LoadResult> {
        if let Some(local_path) = self.local_config_path()
            && self.fs.exists(&local_path)
        {
            return self.load_from_path(&local_path);
        }

        if let Some(user_path) = self.user_config_path()
            && self.fs.exists(&user_path)
        {
            return self.load_from_path(&user_path);
        }

        Ok(LoadResult {
            config: SettingsConfig::default(),
            path: None,
        })
    }

    fn load_from_path(&self, path: &Path) -> Result<LoadResult> {
        let content =
            self.fs
                .read_to_string(path)
                .map_err(|source| AssetCheckError::FileAccess {
                    path: path.to_path_buf(),
                    source,
                })?;

        let config = Self::parse_config(&content).inspect_err(|e| {
            tracing::error!(
                target: crate::LOG_TARGET,
                path = %path.display(),
                "Invalid settings file: {e}"
            );
        })?;

        Ok(LoadResult {
            config,
            path: Some(path.to_path_buf()),
        })
    }
}

fn validate_config_version(config: &SettingsConfig) -> Result<()> {
    match &config.version {
        None => Ok(()),
        Some(v) if v == CONFIG_VERSION => Ok(()),
        Some(v) => Err(AssetCheckError::Config(format!(
            "Unsupported settings version '{v}'. Only version '{CONFIG_VERSION}' is supported."
        ))),
    }
}

fn validate_profiles(config: &SettingsConfig) -> Result<()> {
    let mut seen = IndexSet::new();
    for (index, profile) in config.profiles.iter().enumerate() {
        let name = profile.name.trim();
        if name.is_empty() {
            return Err(AssetCheckError::Config(format!(
                "profiles[{index}] must have a non-empty name"
            )));
        }
        if !seen.insert(name) {
            return Err(AssetCheckError::Config(format!(
                "Duplicate profile name '{name}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
