use std::fs;

use tempfile::TempDir;

use super::*;
use crate::asset::FileSystemAssetDatabase;

fn paths(objects: &[AssetRef]) -> Vec<&str> {
    objects.iter().map(AssetRef::path).collect()
}

#[test]
fn unfiltered_returns_selection_in_order() {
    let selection = HostSelection::new();
    selection.select([
        AssetRef::project("Assets/b.png"),
        AssetRef::scene_object("Main/Player"),
        AssetRef::project("Assets/a.png"),
    ]);

    let objects = selection.filtered(SelectionModes::UNFILTERED);

    assert_eq!(paths(&objects), vec!["Assets/b.png", "Main/Player", "Assets/a.png"]);
}

#[test]
fn assets_mode_drops_scene_objects() {
    let selection = HostSelection::new();
    selection.select([
        AssetRef::project("Assets/a.png"),
        AssetRef::scene_object("Main/Player"),
    ]);

    let objects = selection.filtered(SelectionModes::ASSETS);

    assert_eq!(paths(&objects), vec!["Assets/a.png"]);
}

#[test]
fn top_level_drops_selected_descendants() {
    let selection = HostSelection::new();
    selection.select([
        AssetRef::scene_object("Main/Player"),
        AssetRef::scene_object("Main/Player/Weapon"),
        AssetRef::scene_object("Main/Enemy"),
    ]);

    let objects = selection.filtered(SelectionModes::TOP_LEVEL);

    assert_eq!(paths(&objects), vec!["Main/Player", "Main/Enemy"]);
}

#[test]
fn deep_expands_scene_children() {
    let selection = HostSelection::new();
    selection.set_scene_objects([
        AssetRef::scene_object("Main/Player"),
        AssetRef::scene_object("Main/Player/Weapon"),
        AssetRef::scene_object("Main/Player/Weapon/Muzzle"),
        AssetRef::scene_object("Main/Enemy"),
    ]);
    selection.select([AssetRef::scene_object("Main/Player")]);

    let objects = selection.filtered(SelectionModes::DEEP);

    assert_eq!(
        paths(&objects),
        vec!["Main/Player", "Main/Player/Weapon", "Main/Player/Weapon/Muzzle"]
    );
}

#[test]
fn deep_top_level_expands_from_the_top_level_roots() {
    let selection = HostSelection::new();
    selection.set_scene_objects([
        AssetRef::scene_object("Main"),
        AssetRef::scene_object("Main/Player"),
        AssetRef::scene_object("Main/Player/Weapon"),
    ]);
    selection.select([
        AssetRef::scene_object("Main"),
        AssetRef::scene_object("Main/Player"),
    ]);

    let objects = selection.filtered(SelectionModes::DEEP | SelectionModes::TOP_LEVEL);

    assert_eq!(
        paths(&objects),
        vec!["Main", "Main/Player", "Main/Player/Weapon"]
    );
}

#[test]
fn exclude_prefab_and_editable() {
    let selection = HostSelection::new();
    selection.select([
        AssetRef::project("Assets/Enemy.prefab"),
        AssetRef::project("Packages/com.example/Lib.cs"),
        AssetRef::project("Assets/Player.cs"),
    ]);

    let objects = selection.filtered(SelectionModes::EXCLUDE_PREFAB | SelectionModes::EDITABLE);

    assert_eq!(paths(&objects), vec!["Assets/Player.cs"]);
}

#[test]
fn deep_assets_expands_folders_through_database() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("Assets/Art")).unwrap();
    fs::write(dir.path().join("Assets/Art/a.png"), "x").unwrap();
    fs::write(dir.path().join("Assets/Art/b.png"), "x").unwrap();
    let selection =
        HostSelection::with_database(Rc::new(FileSystemAssetDatabase::new(dir.path())));
    selection.select([AssetRef::folder("Assets/Art")]);

    let objects = selection.filtered(SelectionModes::DEEP_ASSETS);

    assert_eq!(paths(&objects), vec!["Assets/Art", "Assets/Art/a.png", "Assets/Art/b.png"]);
}

#[test]
fn parse_mode_names() {
    assert_eq!(SelectionModes::parse("deep_assets"), Some(SelectionModes::DEEP_ASSETS));
    assert_eq!(SelectionModes::parse("TopLevel"), Some(SelectionModes::TOP_LEVEL));
    assert_eq!(SelectionModes::parse("exclude-prefab"), Some(SelectionModes::EXCLUDE_PREFAB));
    assert_eq!(SelectionModes::parse("everything"), None);
}

#[test]
fn modes_combine() {
    let modes = SelectionModes::ASSETS | SelectionModes::DEEP;
    assert!(modes.contains(SelectionModes::ASSETS));
    assert!(modes.contains(SelectionModes::DEEP));
    assert!(!modes.contains(SelectionModes::TOP_LEVEL));
    assert_eq!(modes.bits(), 18);
}
