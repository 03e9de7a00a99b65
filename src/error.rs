use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetCheckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Asset provider not specified")]
    MissingProvider,

    #[error("Asset checkers not specified")]
    NoCheckers,

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Invalid regex pattern: {pattern}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to access file: {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("No check result at index {0}")]
    ResultIndex(usize),

    #[error("Check result at index {0} cannot be rechecked: asset or checker is missing")]
    NotRecheckable(usize),

    #[error("Check result at index {0} is not repairable")]
    NotRepairable(usize),
}

impl AssetCheckError {
    /// Coarse error category, used for grouping in host error reports.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::MissingProvider | Self::NoCheckers | Self::UnknownProfile(_) => {
                "Config"
            }
            Self::InvalidRegex { .. } | Self::InvalidPattern { .. } => "Pattern",
            Self::FileAccess { .. } | Self::Io(_) => "IO",
            Self::TomlParse(_) | Self::JsonSerialize(_) => "Parse",
            Self::ResultIndex(_) | Self::NotRecheckable(_) | Self::NotRepairable(_) => "Result",
        }
    }

    /// Whether this error stems from invalid settings rather than the environment.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::MissingProvider
                | Self::NoCheckers
                | Self::UnknownProfile(_)
                | Self::InvalidRegex { .. }
                | Self::InvalidPattern { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AssetCheckError>;

/// Failure raised by a single checker invocation.
///
/// The engine never propagates these: each one is converted into an
/// `Exception` record for the (asset, checker) pair that raised it.
#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("Failed to access asset file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid asset: {0}")]
    InvalidAsset(String),

    #[error("Checker '{0}' does not support repair")]
    RepairUnsupported(String),

    #[error("Checker panicked: {0}")]
    Panicked(String),

    #[error("{message}")]
    Custom { kind: String, message: String },
}

impl CheckerError {
    #[must_use]
    pub fn custom(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Custom {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Name of the failure kind, shown as the title of the synthesized record.
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Io { .. } => "IoError",
            Self::InvalidAsset(_) => "InvalidAsset",
            Self::RepairUnsupported(_) => "RepairUnsupported",
            Self::Panicked(_) => "Panic",
            Self::Custom { kind, .. } => kind,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
