use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::asset::{
    AssetDatabase, AssetRef, FileSystemAssetDatabase, HostSelection, SelectionModes,
    SelectionSource,
};
use crate::checker::builtin::{BuiltinCheckerOptions, register_builtin};
use crate::checker::{CheckerRef, CheckerRegistry};
use crate::error::{AssetCheckError, Result};
use crate::provider::{
    AssetProvider, ExplicitAssetProvider, SearchAssetProvider, SelectionAssetProvider,
};
use crate::view::{BUILTIN_VIEW_PROVIDER, CustomViewProvider, builtin_views};

use super::model::{ProviderConfig, SettingsConfig};

/// Runtime settings: live provider, checkers and view provider.
///
/// `checkers` keeps one slot per configured name; names that did not
/// resolve are `None` so the engine can report them.
#[derive(Default)]
pub struct Settings {
    pub provider: Option<Box<dyn AssetProvider>>,
    pub checkers: Vec<Option<CheckerRef>>,
    pub custom_view_provider: Option<Rc<dyn CustomViewProvider>>,
    /// Profile the settings were resolved from.
    pub profile: Option<String>,
}

impl Settings {
    #[must_use]
    pub fn new(provider: Box<dyn AssetProvider>, checkers: Vec<Option<CheckerRef>>) -> Self {
        Self {
            provider: Some(provider),
            checkers,
            custom_view_provider: None,
            profile: None,
        }
    }

    #[must_use]
    pub fn with_custom_view_provider(mut self, provider: Rc<dyn CustomViewProvider>) -> Self {
        self.custom_view_provider = Some(provider);
        self
    }

    /// Live checker registered under `name` in these settings.
    #[must_use]
    pub fn checker(&self, name: &str) -> Option<&CheckerRef> {
        self.checkers.iter().flatten().find(|c| c.name() == name)
    }
}

/// Host collaborators that settings names resolve against.
#[derive(Default)]
pub struct ResolveContext {
    checkers: CheckerRegistry,
    view_providers: IndexMap<String, Rc<dyn CustomViewProvider>>,
    database: Option<Rc<dyn AssetDatabase>>,
    selection: Option<Rc<dyn SelectionSource>>,
}

impl ResolveContext {
    #[must_use]
    pub fn new(checkers: CheckerRegistry) -> Self {
        Self {
            checkers,
            ..Self::default()
        }
    }

    /// Context for a project directory: built-in checkers and views, an
    /// on-disk asset database, and an empty host selection over it.
    #[must_use]
    pub fn for_project(root: &Path, options: &BuiltinCheckerOptions) -> Self {
        let mut checkers = CheckerRegistry::new();
        register_builtin(&mut checkers, root, options);
        let database: Rc<dyn AssetDatabase> = Rc::new(FileSystemAssetDatabase::new(root));
        let selection = Rc::new(HostSelection::with_database(database.clone()));

        Self::new(checkers)
            .with_database(database)
            .with_selection(selection)
            .with_view_provider(BUILTIN_VIEW_PROVIDER, Rc::new(builtin_views()))
    }

    #[must_use]
    pub fn with_database(mut self, database: Rc<dyn AssetDatabase>) -> Self {
        self.database = Some(database);
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Rc<dyn SelectionSource>) -> Self {
        self.selection = Some(selection);
        self
    }

    #[must_use]
    pub fn with_view_provider(
        mut self,
        name: impl Into<String>,
        provider: Rc<dyn CustomViewProvider>,
    ) -> Self {
        self.view_providers.insert(name.into(), provider);
        self
    }

    #[must_use]
    pub const fn checkers(&self) -> &CheckerRegistry {
        &self.checkers
    }

    pub const fn checkers_mut(&mut self) -> &mut CheckerRegistry {
        &mut self.checkers
    }

    fn provider(&self, config: &ProviderConfig) -> Result<Box<dyn AssetProvider>> {
        match config {
            ProviderConfig::Explicit { assets } => {
                Ok(Box::new(ExplicitAssetProvider::new(self.explicit_assets(assets))))
            }
            ProviderConfig::Selection { modes } => {
                let source = self.selection.clone().ok_or_else(|| {
                    AssetCheckError::Config(
                        "Selection provider requires a host selection".to_string(),
                    )
                })?;
                Ok(Box::new(SelectionAssetProvider::new(
                    source,
                    parse_modes(modes)?,
                )))
            }
            ProviderConfig::Search {
                filter,
                include,
                exclude,
                folders,
                ignore_default_assets,
            } => {
                let database = self.database.clone().ok_or_else(|| {
                    AssetCheckError::Config(
                        "Search provider requires an asset database".to_string(),
                    )
                })?;
                let provider = SearchAssetProvider::new(database, filter.as_str())
                    .with_folders(folders.iter().cloned())
                    .with_include(include.as_deref().unwrap_or_default())?
                    .with_exclude(exclude.as_deref().unwrap_or_default())?
                    .ignore_default_assets(*ignore_default_assets);
                Ok(Box::new(provider))
            }
        }
    }

    fn explicit_assets(&self, paths: &[String]) -> Vec<AssetRef> {
        let confined = paths.iter().filter(|path| {
            let confined = AssetRef::project(path.as_str()).is_confined();
            if !confined {
                tracing::warn!(
                    target: crate::LOG_TARGET,
                    path = path.as_str(),
                    "Configured asset lies outside the project; skipped"
                );
            }
            confined
        });
        let Some(database) = &self.database else {
            return confined.map(AssetRef::project).collect();
        };
        confined
            .filter_map(|path| {
                let asset = database.load_asset(path);
                if asset.is_none() {
                    tracing::warn!(
                        target: crate::LOG_TARGET,
                        path = path.as_str(),
                        "Configured asset does not exist; skipped"
                    );
                }
                asset
            })
            .collect()
    }

    fn view_provider(&self, name: Option<&str>) -> Option<Rc<dyn CustomViewProvider>> {
        let name = name.map(str::trim).filter(|name| !name.is_empty())?;
        let provider = self.view_providers.get(name).cloned();
        if provider.is_none() {
            tracing::warn!(
                target: crate::LOG_TARGET,
                provider = name,
                "Custom view provider is not registered; details fall back to plain text"
            );
        }
        provider
    }
}

fn parse_modes(names: &[String]) -> Result<SelectionModes> {
    names.iter().try_fold(SelectionModes::UNFILTERED, |modes, name| {
        SelectionModes::parse(name)
            .map(|mode| modes | mode)
            .ok_or_else(|| AssetCheckError::Config(format!("Unknown selection mode '{name}'")))
    })
}

impl SettingsConfig {
    /// Build runtime settings, from the named profile or the top level.
    ///
    /// A missing provider is not an error here; execution reports it.
    ///
    /// # Errors
    /// Returns an error if the profile does not exist, a selection mode or
    /// regex is invalid, or the provider needs a collaborator the context
    /// lacks.
    pub fn resolve(&self, profile: Option<&str>, context: &ResolveContext) -> Result<Settings> {
        let (provider, checkers, view_provider) = match profile {
            Some(name) => {
                let selected = self
                    .profile(name)
                    .ok_or_else(|| AssetCheckError::UnknownProfile(name.to_string()))?;
                (
                    selected.provider.as_ref(),
                    selected.checkers.as_slice(),
                    selected
                        .custom_view_provider
                        .as_deref()
                        .or(self.custom_view_provider.as_deref()),
                )
            }
            None => (
                self.provider.as_ref(),
                self.checkers.as_slice(),
                self.custom_view_provider.as_deref(),
            ),
        };

        Ok(Settings {
            provider: provider.map(|p| context.provider(p)).transpose()?,
            checkers: context.checkers.resolve(checkers),
            custom_view_provider: context.view_provider(view_provider),
            profile: profile.map(|name| name.trim().to_string()),
        })
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
