//! Derives the displayed subset of a result list.
//!
//! Filtering never mutates or reorders the full list: it yields the indices
//! of the matching records plus the category labels observed across the
//! whole list, which feed the category choice control.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::checker::{AssetCheckResult, ResultTypeMask};

/// Category choice that disables category filtering.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Category choice that keeps only repairable records.
pub const REPAIRABLE: &str = "Repairable";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Repairable,
    /// Keep records carrying this (trimmed) category.
    Named(String),
}

impl CategoryFilter {
    /// Blank input selects all categories; anything else is trimmed.
    #[must_use]
    pub fn parse(category: &str) -> Self {
        match category.trim() {
            "" | ALL_CATEGORIES => Self::All,
            REPAIRABLE => Self::Repairable,
            named => Self::Named(named.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Repairable => REPAIRABLE,
            Self::Named(name) => name,
        }
    }

    #[must_use]
    pub fn matches(&self, result: &AssetCheckResult) -> bool {
        match self {
            Self::All => true,
            Self::Repairable => result.repairable,
            Self::Named(name) => result.has_category(name),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(category: String) -> Self {
        Self::parse(&category)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultFilter {
    pub types: ResultTypeMask,
    pub category: CategoryFilter,
}

impl ResultFilter {
    #[must_use]
    pub const fn new(types: ResultTypeMask, category: CategoryFilter) -> Self {
        Self { types, category }
    }

    #[must_use]
    pub fn matches(&self, result: &AssetCheckResult) -> bool {
        self.types.intersects(result.result_type) && self.category.matches(result)
    }

    #[must_use]
    pub fn apply(&self, results: &[AssetCheckResult]) -> FilteredResults {
        FilteredResults {
            indices: results
                .iter()
                .enumerate()
                .filter(|(_, result)| self.matches(result))
                .map(|(index, _)| index)
                .collect(),
            categories: collect_categories(results),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredResults {
    /// Indices into the full list, in list order.
    pub indices: Vec<usize>,
    /// Distinct categories seen across the full list, in first-seen order.
    pub categories: Vec<String>,
}

impl FilteredResults {
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolve the indices against the list they were computed from.
    pub fn iter<'a>(
        &'a self,
        results: &'a [AssetCheckResult],
    ) -> impl Iterator<Item = &'a AssetCheckResult> + 'a {
        self.indices.iter().filter_map(|&index| results.get(index))
    }

    /// Choices for the category control: the two sentinels, then the
    /// observed categories.
    #[must_use]
    pub fn category_choices(&self) -> Vec<String> {
        [ALL_CATEGORIES, REPAIRABLE]
            .into_iter()
            .map(str::to_string)
            .chain(self.categories.iter().cloned())
            .collect()
    }
}

/// Distinct trimmed category labels, excluding blanks and the sentinels.
#[must_use]
pub fn collect_categories(results: &[AssetCheckResult]) -> Vec<String> {
    let mut categories = IndexSet::new();
    for category in results.iter().flat_map(|result| &result.categories) {
        let category = category.trim();
        if category.is_empty() || category == ALL_CATEGORIES || category == REPAIRABLE {
            continue;
        }
        categories.insert(category.to_string());
    }
    categories.into_iter().collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
