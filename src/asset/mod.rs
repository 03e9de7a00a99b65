//! Asset references and the host collaborators that produce them.
//!
//! An [`AssetRef`] identifies a resource owned by the host environment. It is
//! an identity handle, not the resource itself: records that hold one never
//! control the asset's lifecycle.

mod database;
mod search_filter;
mod selection;

pub use database::FileSystemAssetDatabase;
pub use search_filter::SearchFilter;
pub use selection::{HostSelection, SelectionModes, SelectionSource};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Root folder searched when no folders are configured.
pub const DEFAULT_SEARCH_FOLDER: &str = "Assets";

/// Path prefix of read-only package content.
const READ_ONLY_PREFIX: &str = "Packages/";

/// Concrete type of an asset as understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Folder,
    Texture,
    Model,
    Audio,
    Material,
    Prefab,
    Scene,
    Script,
    Shader,
    Text,
    GameObject,
    /// Placeholder for files the host cannot import.
    Default,
}

impl AssetKind {
    pub const ALL: [Self; 12] = [
        Self::Folder,
        Self::Texture,
        Self::Model,
        Self::Audio,
        Self::Material,
        Self::Prefab,
        Self::Scene,
        Self::Script,
        Self::Shader,
        Self::Text,
        Self::GameObject,
        Self::Default,
    ];

    /// Infer the kind of a project file from its extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "tga" | "psd" | "tif" | "tiff" | "bmp" | "exr" | "hdr" => {
                Self::Texture
            }
            "fbx" | "obj" | "blend" | "dae" | "3ds" => Self::Model,
            "wav" | "mp3" | "ogg" | "aif" | "aiff" | "flac" => Self::Audio,
            "mat" => Self::Material,
            "prefab" => Self::Prefab,
            "unity" => Self::Scene,
            "cs" | "js" | "rs" => Self::Script,
            "shader" | "hlsl" | "cginc" | "compute" => Self::Shader,
            "txt" | "json" | "xml" | "yaml" | "yml" | "csv" | "md" | "bytes" => Self::Text,
            _ => Self::Default,
        }
    }

    /// Type name used by `t:` search tokens.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Folder => "Folder",
            Self::Texture => "Texture",
            Self::Model => "Model",
            Self::Audio => "Audio",
            Self::Material => "Material",
            Self::Prefab => "Prefab",
            Self::Scene => "Scene",
            Self::Script => "Script",
            Self::Shader => "Shader",
            Self::Text => "Text",
            Self::GameObject => "GameObject",
            Self::Default => "Default",
        }
    }

    /// Case-insensitive lookup by type name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Folders and unsupported files both load as the host's placeholder type.
    #[must_use]
    pub const fn is_default_asset(self) -> bool {
        matches!(self, Self::Folder | Self::Default)
    }
}

/// Where an asset lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetOrigin {
    /// A file or folder inside the project.
    Project,
    /// An object in an open scene hierarchy.
    Scene,
}

/// Reference to a host-owned asset.
///
/// Paths are host paths with `/` separators: project-relative for project
/// assets (`Assets/Textures/hero.png`), hierarchy paths for scene objects
/// (`Main/Player/Weapon`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    path: String,
    kind: AssetKind,
    origin: AssetOrigin,
}

impl AssetRef {
    /// Reference a project asset, inferring its kind from the extension.
    #[must_use]
    pub fn project(path: impl Into<String>) -> Self {
        let path = normalize_path(&path.into());
        let kind = path
            .rsplit_once('.')
            .filter(|(_, ext)| !ext.contains('/'))
            .map_or(AssetKind::Default, |(_, ext)| AssetKind::from_extension(ext));
        Self {
            path,
            kind,
            origin: AssetOrigin::Project,
        }
    }

    #[must_use]
    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            path: normalize_path(&path.into()),
            kind: AssetKind::Folder,
            origin: AssetOrigin::Project,
        }
    }

    /// Reference an object in a scene hierarchy.
    #[must_use]
    pub fn scene_object(path: impl Into<String>) -> Self {
        Self {
            path: normalize_path(&path.into()),
            kind: AssetKind::GameObject,
            origin: AssetOrigin::Scene,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: AssetKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn kind(&self) -> AssetKind {
        self.kind
    }

    #[must_use]
    pub const fn origin(&self) -> AssetOrigin {
        self.origin
    }

    /// Last path segment.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    #[must_use]
    pub fn is_project_asset(&self) -> bool {
        self.origin == AssetOrigin::Project
    }

    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.kind == AssetKind::Folder
    }

    /// Whether the user may modify this asset.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        !(self.is_project_asset() && self.path.starts_with(READ_ONLY_PREFIX))
    }

    /// Whether the path is relative and never climbs above its root.
    #[must_use]
    pub fn is_confined(&self) -> bool {
        !self.path.starts_with('/')
            && !self.path.contains(':')
            && !self.path.split('/').any(|segment| segment == "..")
    }

    /// Whether `self` lies strictly beneath `other` in the path hierarchy.
    #[must_use]
    pub fn is_descendant_of(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.path.len() > other.path.len()
            && self.path.starts_with(&other.path)
            && self.path.as_bytes()[other.path.len()] == b'/'
    }
}

/// Host index of project assets.
pub trait AssetDatabase {
    /// Find project asset paths matching `filter` beneath the given root folders.
    ///
    /// # Errors
    /// Returns an error if the filter is malformed or a folder cannot be searched.
    fn find_assets(&self, filter: &str, folders: &[String]) -> Result<Vec<String>>;

    /// Load the asset at a project path, or `None` if nothing exists there.
    fn load_asset(&self, path: &str) -> Option<AssetRef>;
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
