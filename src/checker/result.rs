use std::ops::BitOr;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::asset::AssetRef;
use crate::error::CheckerError;

use super::CheckerRef;

/// Category attached to every record synthesized from a checker failure.
pub const EXCEPTION_CATEGORY: &str = "Exception";

/// Severity of a check result. Mutually exclusive per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckResultType {
    AllPass,
    NotImportant,
    Warning,
    Error,
    Exception,
}

impl CheckResultType {
    pub const ALL: [Self; 5] = [
        Self::AllPass,
        Self::NotImportant,
        Self::Warning,
        Self::Error,
        Self::Exception,
    ];

    /// Bit of this type inside a [`ResultTypeMask`].
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Self::AllPass => 1 << 0,
            Self::NotImportant => 1 << 1,
            Self::Warning => 1 << 2,
            Self::Error => 1 << 3,
            Self::Exception => 1 << 4,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AllPass => "All Pass",
            Self::NotImportant => "Not Important",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Exception => "Exception",
        }
    }

    /// RGB border color used by result views.
    #[must_use]
    pub const fn border_color(self) -> (u8, u8, u8) {
        match self {
            Self::AllPass => (0, 190, 0),
            Self::NotImportant => (229, 229, 229),
            Self::Warning => (255, 200, 0),
            Self::Error => (255, 0, 0),
            Self::Exception => (150, 0, 0),
        }
    }
}

/// Union of result types, used to filter result lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTypeMask(u32);

impl ResultTypeMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(!0);

    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn intersects(self, result_type: CheckResultType) -> bool {
        self.0 & result_type.bit() != 0
    }

    #[must_use]
    pub const fn with(self, result_type: CheckResultType) -> Self {
        Self(self.0 | result_type.bit())
    }

    #[must_use]
    pub const fn without(self, result_type: CheckResultType) -> Self {
        Self(self.0 & !result_type.bit())
    }
}

impl Default for ResultTypeMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<CheckResultType> for ResultTypeMask {
    fn from(result_type: CheckResultType) -> Self {
        Self(result_type.bit())
    }
}

impl BitOr for ResultTypeMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<CheckResultType> for ResultTypeMask {
    type Output = Self;

    fn bitor(self, rhs: CheckResultType) -> Self {
        self.with(rhs)
    }
}

impl FromIterator<CheckResultType> for ResultTypeMask {
    fn from_iter<I: IntoIterator<Item = CheckResultType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

/// Outcome of applying one checker to one asset.
///
/// `asset` and `checker` are back-references: the record does not own
/// either. `custom_data` is opaque to everything but the checker that
/// produced it, and `custom_view_id` selects an alternate details renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetCheckResult {
    #[serde(rename = "type")]
    pub result_type: CheckResultType,
    #[serde(default)]
    pub categories: Vec<String>,
    pub title: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub asset: Option<AssetRef>,
    #[serde(skip)]
    pub checker: Option<CheckerRef>,
    #[serde(default)]
    pub repairable: bool,
    #[serde(default)]
    pub custom_data: Option<Json>,
    #[serde(default)]
    pub custom_view_id: Option<String>,
}

impl AssetCheckResult {
    #[must_use]
    pub fn new(result_type: CheckResultType, title: impl Into<String>) -> Self {
        Self {
            result_type,
            categories: Vec::new(),
            title: title.into(),
            details: String::new(),
            asset: None,
            checker: None,
            repairable: false,
            custom_data: None,
            custom_view_id: None,
        }
    }

    /// Record describing a checker failure on `asset`.
    #[must_use]
    pub fn from_failure(error: &CheckerError, asset: AssetRef, checker: CheckerRef) -> Self {
        Self {
            result_type: CheckResultType::Exception,
            categories: vec![EXCEPTION_CATEGORY.to_string()],
            title: error.kind_name().to_string(),
            details: error.to_string(),
            asset: Some(asset),
            checker: Some(checker),
            repairable: false,
            custom_data: None,
            custom_view_id: None,
        }
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    #[must_use]
    pub fn with_asset(mut self, asset: AssetRef) -> Self {
        self.asset = Some(asset);
        self
    }

    #[must_use]
    pub const fn repairable(mut self, repairable: bool) -> Self {
        self.repairable = repairable;
        self
    }

    #[must_use]
    pub fn with_custom_view(mut self, view_id: impl Into<String>, data: Json) -> Self {
        self.custom_view_id = Some(view_id.into());
        self.custom_data = Some(data);
        self
    }

    /// Whether a category equal to `category` (after trimming) is attached.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        let category = category.trim();
        self.categories.iter().any(|c| c.trim() == category)
    }

    /// Turn this record into an `Exception` record after a failed operation.
    ///
    /// Title and details are taken from the failure; the record stops being
    /// repairable and gains the exception category.
    pub fn mark_failed(&mut self, error: &CheckerError) {
        self.result_type = CheckResultType::Exception;
        self.title = error.kind_name().to_string();
        self.details = error.to_string();
        self.repairable = false;
        if !self.has_category(EXCEPTION_CATEGORY) {
            self.categories.push(EXCEPTION_CATEGORY.to_string());
        }
    }

    /// Recheck and repair both need the (asset, checker) pair.
    #[must_use]
    pub const fn can_recheck(&self) -> bool {
        self.asset.is_some() && self.checker.is_some()
    }

    #[must_use]
    pub fn checker_name(&self) -> Option<&str> {
        self.checker.as_ref().map(|c| c.name())
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
