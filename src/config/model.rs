use serde::{Deserialize, Serialize};

use crate::asset::DEFAULT_SEARCH_FOLDER;
use crate::checker::builtin::BuiltinCheckerOptions;

/// Only supported settings schema version.
pub const CONFIG_VERSION: &str = "1";

/// Settings file contents.
///
/// The top-level `provider`, `checkers` and `custom_view_provider` form the
/// default configuration; each `[[profiles]]` entry is an alternative
/// bundle selected by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Name of a registered custom view provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_view_provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderConfig>,

    /// Checker names, run in this order.
    #[serde(default)]
    pub checkers: Vec<String>,

    #[serde(default)]
    pub profiles: Vec<ProfileConfig>,

    #[serde(default)]
    pub checker_options: BuiltinCheckerOptions,
}

impl SettingsConfig {
    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
        let name = name.trim();
        self.profiles.iter().find(|profile| profile.name.trim() == name)
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|profile| profile.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,

    /// Falls back to the top-level provider name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_view_provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderConfig>,

    #[serde(default)]
    pub checkers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Project paths checked verbatim.
    Explicit {
        #[serde(default)]
        assets: Vec<String>,
    },

    /// The host selection, filtered by mode names such as `"assets"`.
    Selection {
        #[serde(default)]
        modes: Vec<String>,
    },

    /// A query against the asset index.
    Search {
        #[serde(default)]
        filter: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        include: Option<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        exclude: Option<String>,

        #[serde(default = "default_folders")]
        folders: Vec<String>,

        #[serde(default)]
        ignore_default_assets: bool,
    },
}

fn default_folders() -> Vec<String> {
    vec![DEFAULT_SEARCH_FOLDER.to_string()]
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
