use std::cell::RefCell;
use std::fs;

use tempfile::TempDir;

use super::*;
use crate::asset::{AssetKind, FileSystemAssetDatabase};

/// Index returning a fixed path list and recording the queries it receives.
struct StaticDatabase {
    paths: Vec<&'static str>,
    queries: RefCell<Vec<(String, Vec<String>)>>,
}

impl StaticDatabase {
    fn new(paths: Vec<&'static str>) -> Rc<Self> {
        Rc::new(Self {
            paths,
            queries: RefCell::new(Vec::new()),
        })
    }
}

impl AssetDatabase for StaticDatabase {
    fn find_assets(&self, filter: &str, folders: &[String]) -> Result<Vec<String>> {
        self.queries
            .borrow_mut()
            .push((filter.to_string(), folders.to_vec()));
        Ok(self.paths.iter().map(ToString::to_string).collect())
    }

    fn load_asset(&self, path: &str) -> Option<AssetRef> {
        (!path.contains("missing")).then(|| AssetRef::project(path))
    }
}

fn paths(assets: &[AssetRef]) -> Vec<&str> {
    assets.iter().map(AssetRef::path).collect()
}

#[test]
fn defaults_to_assets_folder() {
    let database = StaticDatabase::new(vec![]);
    let provider = SearchAssetProvider::new(database.clone(), "t:Texture");

    provider.get_assets().unwrap();

    assert_eq!(
        database.queries.borrow().as_slice(),
        &[("t:Texture".to_string(), vec!["Assets".to_string()])]
    );
}

#[test]
fn empty_folder_list_keeps_default() {
    let database = StaticDatabase::new(vec![]);
    let provider = SearchAssetProvider::new(database, "").with_folders(Vec::<String>::new());

    assert_eq!(provider.folders(), ["Assets"]);
}

#[test]
fn include_and_exclude_match_against_path() {
    let database = StaticDatabase::new(vec![
        "Assets/Art/hero.png",
        "Assets/Art/old/hero.png",
        "Assets/Audio/theme.wav",
    ]);
    let provider = SearchAssetProvider::new(database, "")
        .with_include(r"^Assets/Art/")
        .unwrap()
        .with_exclude(r"/old/")
        .unwrap();

    assert_eq!(
        paths(&provider.get_assets().unwrap()),
        vec!["Assets/Art/hero.png"]
    );
}

#[test]
fn blank_patterns_disable_filtering() {
    let database = StaticDatabase::new(vec!["Assets/a.png", "Assets/b.png"]);
    let provider = SearchAssetProvider::new(database, "")
        .with_include("  ")
        .unwrap()
        .with_exclude("")
        .unwrap();

    assert_eq!(provider.get_assets().unwrap().len(), 2);
}

#[test]
fn invalid_regex_is_rejected() {
    let database = StaticDatabase::new(vec![]);
    let err = SearchAssetProvider::new(database, "")
        .with_exclude("(unclosed")
        .err()
        .unwrap();

    assert!(matches!(err, AssetCheckError::InvalidRegex { ref pattern, .. } if pattern == "(unclosed"));
}

#[test]
fn unloadable_paths_are_dropped() {
    let database = StaticDatabase::new(vec!["Assets/missing.png", "Assets/found.png"]);
    let provider = SearchAssetProvider::new(database, "");

    assert_eq!(paths(&provider.get_assets().unwrap()), vec!["Assets/found.png"]);
}

#[test]
fn default_assets_are_dropped_when_ignored() {
    let database = StaticDatabase::new(vec!["Assets/readme.unknown", "Assets/hero.png"]);

    let kept = SearchAssetProvider::new(database.clone(), "")
        .get_assets()
        .unwrap();
    let ignored = SearchAssetProvider::new(database, "")
        .ignore_default_assets(true)
        .get_assets()
        .unwrap();

    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].kind(), AssetKind::Default);
    assert_eq!(paths(&ignored), vec!["Assets/hero.png"]);
}

#[test]
fn searches_project_on_disk() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("Assets/Art")).unwrap();
    fs::write(dir.path().join("Assets/Art/hero.png"), "png").unwrap();
    fs::write(dir.path().join("Assets/Art/notes.txt"), "txt").unwrap();
    let database = Rc::new(FileSystemAssetDatabase::new(dir.path()));

    let provider = SearchAssetProvider::new(database, "").ignore_default_assets(true);

    assert_eq!(
        paths(&provider.get_assets().unwrap()),
        vec!["Assets/Art/hero.png", "Assets/Art/notes.txt"]
    );
}

#[test]
fn missing_search_folder_is_an_error() {
    let dir = TempDir::new().unwrap();
    let database = Rc::new(FileSystemAssetDatabase::new(dir.path()));

    let provider = SearchAssetProvider::new(database, "");

    assert!(provider.get_assets().is_err());
}
