use std::fs;

use tempfile::TempDir;

use super::*;
use crate::checker::builtin::{FILE_SIZE, LINE_ENDINGS};
use crate::config::FileConfigLoader;
use crate::config::RealFileSystem;

fn parse(text: &str) -> SettingsConfig {
    FileConfigLoader::<RealFileSystem>::parse_config(text).unwrap()
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("Assets/Art")).unwrap();
    fs::write(dir.path().join("Assets/Art/hero.png"), "png").unwrap();
    fs::write(dir.path().join("Assets/Art/notes.txt"), "notes\r\n").unwrap();
    dir
}

fn paths(settings: &Settings) -> Vec<String> {
    settings
        .provider
        .as_ref()
        .unwrap()
        .get_assets()
        .unwrap()
        .iter()
        .map(|a| a.path().to_string())
        .collect()
}

#[test]
fn resolves_top_level_settings() {
    let dir = project();
    let config = parse(
        r#"
        checkers = ["file-size", "missing", "line-endings"]
        custom_view_provider = "builtin"

        [provider]
        kind = "search"
        filter = "t:Texture"
        "#,
    );
    let context = ResolveContext::for_project(dir.path(), &config.checker_options);

    let settings = config.resolve(None, &context).unwrap();

    assert_eq!(paths(&settings), vec!["Assets/Art/hero.png"]);
    assert_eq!(settings.checkers.len(), 3);
    assert_eq!(settings.checkers[0].as_ref().unwrap().name(), FILE_SIZE);
    assert!(settings.checkers[1].is_none());
    assert_eq!(settings.checkers[2].as_ref().unwrap().name(), LINE_ENDINGS);
    assert!(settings.custom_view_provider.is_some());
    assert!(settings.checker(LINE_ENDINGS).is_some());
    assert_eq!(settings.profile, None);
}

#[test]
fn resolved_checkers_are_the_registered_instances() {
    let dir = project();
    let config = parse(r#"checkers = ["file-size", "file-size"]"#);
    let context = ResolveContext::for_project(dir.path(), &config.checker_options);

    let settings = config.resolve(None, &context).unwrap();

    let registered = context.checkers().get(FILE_SIZE).unwrap();
    assert!(settings.checkers.iter().flatten().all(|c| c.ptr_eq(&registered)));
    assert!(settings.provider.is_none());
}

#[test]
fn resolves_named_profile() {
    let dir = project();
    let config = parse(
        r#"
        checkers = ["file-size"]
        custom_view_provider = "builtin"

        [[profiles]]
        name = "explicit"
        checkers = ["line-endings"]
        provider = { kind = "explicit", assets = ["Assets/Art/notes.txt", "Assets/gone.txt"] }
        "#,
    );
    let context = ResolveContext::for_project(dir.path(), &config.checker_options);

    let settings = config.resolve(Some("explicit"), &context).unwrap();

    assert_eq!(paths(&settings), vec!["Assets/Art/notes.txt"]);
    assert_eq!(settings.checkers.len(), 1);
    assert_eq!(settings.checkers[0].as_ref().unwrap().name(), LINE_ENDINGS);
    assert!(settings.custom_view_provider.is_some());
    assert_eq!(settings.profile.as_deref(), Some("explicit"));
}

#[test]
fn unknown_profile_is_an_error() {
    let config = parse("");
    let err = config
        .resolve(Some("nope"), &ResolveContext::default())
        .err()
        .unwrap();

    assert!(matches!(err, AssetCheckError::UnknownProfile(ref name) if name == "nope"));
}

#[test]
fn explicit_assets_without_database_are_taken_verbatim() {
    let config = parse(
        r#"
        [provider]
        kind = "explicit"
        assets = ["Assets/a.png", "Assets/b.png"]
        "#,
    );

    let settings = config.resolve(None, &ResolveContext::default()).unwrap();

    assert_eq!(paths(&settings), vec!["Assets/a.png", "Assets/b.png"]);
}

#[test]
fn selection_provider_parses_modes() {
    let selection = Rc::new(HostSelection::new());
    selection.select([
        AssetRef::project("Assets/a.png"),
        AssetRef::scene_object("Main/Player"),
    ]);
    let context = ResolveContext::default().with_selection(selection);
    let config = parse(
        r#"
        [provider]
        kind = "selection"
        modes = ["Assets", "exclude_prefab"]
        "#,
    );

    let settings = config.resolve(None, &context).unwrap();

    assert_eq!(paths(&settings), vec!["Assets/a.png"]);
}

#[test]
fn unknown_selection_mode_is_an_error() {
    let context = ResolveContext::default().with_selection(Rc::new(HostSelection::new()));
    let config = parse(
        r#"
        [provider]
        kind = "selection"
        modes = ["sideways"]
        "#,
    );

    let err = config.resolve(None, &context).err().unwrap();

    assert!(err.to_string().contains("Unknown selection mode 'sideways'"));
}

#[test]
fn providers_need_their_collaborators() {
    let search = parse(
        r#"
        [provider]
        kind = "search"
        "#,
    );
    let selection = parse(
        r#"
        [provider]
        kind = "selection"
        "#,
    );

    assert!(search.resolve(None, &ResolveContext::default()).is_err());
    assert!(selection.resolve(None, &ResolveContext::default()).is_err());
}

#[test]
fn invalid_regex_fails_resolution() {
    let dir = project();
    let config = parse(
        r#"
        [provider]
        kind = "search"
        include = "[unclosed"
        "#,
    );
    let context = ResolveContext::for_project(dir.path(), &config.checker_options);

    let err = config.resolve(None, &context).err().unwrap();

    assert_eq!(err.error_type(), "Pattern");
}

#[test]
fn unknown_view_provider_resolves_to_none() {
    let config = parse(r#"custom_view_provider = "fancy""#);

    let settings = config.resolve(None, &ResolveContext::default()).unwrap();

    assert!(settings.custom_view_provider.is_none());
}

#[test]
fn explicit_assets_outside_the_project_are_skipped() {
    let dir = project();
    let config = parse(
        r#"
        [provider]
        kind = "explicit"
        assets = ["../elsewhere.txt", "Assets/Art/notes.txt", "/etc/hosts"]
        "#,
    );
    let context = ResolveContext::for_project(dir.path(), &config.checker_options);

    let with_database = config.resolve(None, &context).unwrap();
    let without_database = config.resolve(None, &ResolveContext::default()).unwrap();

    assert_eq!(paths(&with_database), vec!["Assets/Art/notes.txt"]);
    assert_eq!(paths(&without_database), vec!["Assets/Art/notes.txt"]);
}
