use std::cell::RefCell;
use std::ops::BitOr;
use std::rc::Rc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::{AssetDatabase, AssetKind, AssetRef};

/// Bitmask controlling how the current selection is filtered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionModes(u32);

impl SelectionModes {
    /// Return the whole selection.
    pub const UNFILTERED: Self = Self(0);
    /// Drop objects whose ancestor is also selected.
    pub const TOP_LEVEL: Self = Self(1 << 0);
    /// Include every scene object beneath a selected one.
    pub const DEEP: Self = Self(1 << 1);
    /// Drop prefab assets.
    pub const EXCLUDE_PREFAB: Self = Self(1 << 2);
    /// Drop read-only objects.
    pub const EDITABLE: Self = Self(1 << 3);
    /// Only keep project assets.
    pub const ASSETS: Self = Self(1 << 4);
    /// Expand selected folders into the assets they contain.
    pub const DEEP_ASSETS: Self = Self(1 << 5);

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Parse a mode name as written in settings files.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "unfiltered" => Some(Self::UNFILTERED),
            "toplevel" => Some(Self::TOP_LEVEL),
            "deep" => Some(Self::DEEP),
            "excludeprefab" => Some(Self::EXCLUDE_PREFAB),
            "editable" => Some(Self::EDITABLE),
            "assets" => Some(Self::ASSETS),
            "deepassets" => Some(Self::DEEP_ASSETS),
            _ => None,
        }
    }
}

impl BitOr for SelectionModes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Host facility answering "what is currently selected".
pub trait SelectionSource {
    /// The current selection, filtered by `modes`, in selection order.
    fn filtered(&self, modes: SelectionModes) -> Vec<AssetRef>;
}

/// In-memory selection state maintained by the host.
///
/// The host pushes selection changes with [`HostSelection::select`]; scene
/// objects known to the host are registered so deep selection can expand
/// them, and an optional asset database expands selected folders.
#[derive(Default)]
pub struct HostSelection {
    selected: RefCell<Vec<AssetRef>>,
    scene_objects: RefCell<Vec<AssetRef>>,
    database: Option<Rc<dyn AssetDatabase>>,
}

impl HostSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_database(database: Rc<dyn AssetDatabase>) -> Self {
        Self {
            database: Some(database),
            ..Self::default()
        }
    }

    /// Replace the current selection.
    pub fn select(&self, objects: impl IntoIterator<Item = AssetRef>) {
        *self.selected.borrow_mut() = objects.into_iter().collect();
    }

    pub fn clear(&self) {
        self.selected.borrow_mut().clear();
    }

    /// Register the scene hierarchy used for deep selection.
    pub fn set_scene_objects(&self, objects: impl IntoIterator<Item = AssetRef>) {
        *self.scene_objects.borrow_mut() = objects.into_iter().collect();
    }

    fn expand_deep(&self, selected: &[AssetRef], out: &mut IndexSet<AssetRef>) {
        let scene_objects = self.scene_objects.borrow();
        for object in selected {
            out.insert(object.clone());
            scene_objects
                .iter()
                .filter(|candidate| candidate.is_descendant_of(object))
                .for_each(|child| {
                    out.insert(child.clone());
                });
        }
    }

    fn expand_folders(&self, selected: IndexSet<AssetRef>) -> IndexSet<AssetRef> {
        let Some(database) = self.database.as_ref() else {
            return selected;
        };
        let mut out = IndexSet::new();
        for object in selected {
            if !object.is_folder() {
                out.insert(object);
                continue;
            }
            let folder = object.path().to_string();
            out.insert(object);
            match database.find_assets("", std::slice::from_ref(&folder)) {
                Ok(paths) => out.extend(paths.iter().filter_map(|p| database.load_asset(p))),
                Err(e) => tracing::debug!(
                    target: crate::LOG_TARGET,
                    folder = %folder,
                    "skipping folder expansion: {e}"
                ),
            }
        }
        out
    }
}

impl SelectionSource for HostSelection {
    fn filtered(&self, modes: SelectionModes) -> Vec<AssetRef> {
        let mut selected = self.selected.borrow().clone();

        // Top-level reduction applies to the raw selection, before expansion.
        if modes.contains(SelectionModes::TOP_LEVEL) {
            let all = selected.clone();
            selected.retain(|object| !all.iter().any(|other| object.is_descendant_of(other)));
        }

        let mut objects = IndexSet::new();
        if modes.contains(SelectionModes::DEEP) {
            self.expand_deep(&selected, &mut objects);
        } else {
            objects.extend(selected);
        }

        if modes.contains(SelectionModes::DEEP_ASSETS) {
            objects = self.expand_folders(objects);
        }

        objects
            .into_iter()
            .filter(|object| {
                !(modes.contains(SelectionModes::ASSETS) && !object.is_project_asset())
                    && !(modes.contains(SelectionModes::EXCLUDE_PREFAB)
                        && object.kind() == AssetKind::Prefab)
                    && !(modes.contains(SelectionModes::EDITABLE) && !object.is_editable())
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
