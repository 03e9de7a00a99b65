#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use asset_checker::asset::AssetRef;
use asset_checker::checker::{AssetChecker, CheckOutcome, CheckerRegistry};
use asset_checker::config::{
    ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME, ResolveContext, Settings,
};
use asset_checker::state::StateStore;
use tempfile::TempDir;

/// Creates a temporary project directory for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty `Assets` folder.
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        fixture.create_dir("Assets");
        fixture
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Creates a file of `size` bytes.
    pub fn create_sized_file(&self, relative_path: &str, size: usize) {
        self.create_file(relative_path, &"x".repeat(size));
    }

    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.path().join(LOCAL_CONFIG_NAME)
    }

    /// Writes the project settings file.
    pub fn create_settings(&self, content: &str) {
        self.create_file(LOCAL_CONFIG_NAME, content);
    }

    pub fn store(&self) -> StateStore {
        StateStore::for_project(self.path())
    }

    /// Loads the settings file and resolves it for this project.
    pub fn resolve(&self, profile: Option<&str>) -> Settings {
        self.resolve_with(profile, |_| {})
    }

    /// Like [`Self::resolve`], registering extra checkers first.
    pub fn resolve_with(
        &self,
        profile: Option<&str>,
        register: impl FnOnce(&mut CheckerRegistry),
    ) -> Settings {
        let loaded = FileConfigLoader::new()
            .load_from_path(&self.settings_path())
            .expect("Failed to load settings");
        let mut context = ResolveContext::for_project(self.path(), &loaded.config.checker_options);
        register(context.checkers_mut());
        loaded
            .config
            .resolve(profile, &context)
            .expect("Failed to resolve settings")
    }
}

/// Checker that panics on assets whose path contains `needle`.
pub struct PanicOn(pub &'static str);

impl AssetChecker for PanicOn {
    fn name(&self) -> &str {
        "panic-on"
    }

    fn check_asset(&self, asset: &AssetRef) -> CheckOutcome {
        assert!(!asset.path().contains(self.0), "cannot read {}", asset.path());
        Ok(None)
    }
}
