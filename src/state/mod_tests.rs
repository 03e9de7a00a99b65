use std::fs;

use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::asset::AssetRef;
use crate::checker::{AssetChecker, CheckOutcome, CheckResultType};

struct NamedChecker(&'static str);

impl AssetChecker for NamedChecker {
    fn name(&self) -> &str {
        self.0
    }

    fn check_asset(&self, _asset: &AssetRef) -> CheckOutcome {
        Ok(None)
    }
}

#[test]
fn state_dir_prefers_library() {
    let temp_dir = TempDir::new().unwrap();
    assert_eq!(
        detect_state_dir(temp_dir.path()),
        temp_dir.path().join(".asset-checker")
    );

    fs::create_dir(temp_dir.path().join("Library")).unwrap();
    assert_eq!(
        state_path(temp_dir.path()),
        temp_dir.path().join("Library/asset-checker/state.json")
    );
}

#[test]
fn missing_state_file_loads_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let store = StateStore::for_project(temp_dir.path());

    let state = store.load().unwrap();

    assert!(state.results.is_empty());
    assert_eq!(state.type_filter, ResultTypeMask::ALL);
    assert_eq!(state.category_filter, CategoryFilter::All);
    assert_eq!(state.icon_style, ResultIconStyle::Style2);
}

#[test]
fn saved_state_reloads_and_rebinds_checkers() {
    let temp_dir = TempDir::new().unwrap();
    let store = StateStore::for_project(temp_dir.path());
    let checker = CheckerRef::new(NamedChecker("file-size"));
    let mut result = AssetCheckResult::new(CheckResultType::Warning, "Large texture")
        .with_categories(["Texture"])
        .with_asset(AssetRef::project("Assets/big.png"))
        .with_custom_view("file-size", json!({"size": 10}));
    result.checker = Some(checker.clone());

    let state = SessionState {
        profile: Some("textures".to_string()),
        results: vec![StoredCheckResult::capture(&result)],
        type_filter: ResultTypeMask::from(CheckResultType::Warning),
        category_filter: CategoryFilter::parse("Texture"),
        icon_style: ResultIconStyle::Style3,
        ..SessionState::default()
    };
    assert_eq!(store.save(&state).unwrap(), SaveOutcome::Saved);

    let loaded = store.load().unwrap();
    let lookup = |name: &str| (name == "file-size").then(|| checker.clone());
    let restored: Vec<_> = loaded
        .results
        .into_iter()
        .map(|stored| stored.restore(lookup))
        .collect();

    assert_eq!(loaded.profile.as_deref(), Some("textures"));
    assert_eq!(loaded.category_filter, CategoryFilter::Named("Texture".to_string()));
    assert_eq!(loaded.icon_style, ResultIconStyle::Style3);
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].title, "Large texture");
    assert_eq!(restored[0].custom_data, Some(json!({"size": 10})));
    assert!(restored[0].checker.as_ref().unwrap().ptr_eq(&checker));
}

#[test]
fn unknown_checker_name_restores_without_checker() {
    let mut result = AssetCheckResult::new(CheckResultType::Error, "gone");
    result.checker = Some(CheckerRef::new(NamedChecker("removed")));

    let restored = StoredCheckResult::capture(&result).restore(|_| None);

    assert!(restored.checker.is_none());
    assert!(!restored.can_recheck());
}

#[test]
fn partial_state_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.json");
    fs::write(&path, r#"{"category_filter": "  "}"#).unwrap();

    let state = StateStore::new(path).load().unwrap();

    assert_eq!(state.category_filter, CategoryFilter::All);
    assert_eq!(state.type_filter, ResultTypeMask::ALL);
}

#[test]
fn corrupt_state_file_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state.json");
    fs::write(&path, "{not json").unwrap();

    let err = StateStore::new(path).load().unwrap_err();

    assert_eq!(err.error_type(), "Parse");
}
