//! Asset providers: the first stage of a check run.
//!
//! A provider only decides *which* assets get checked and in what order.
//! Three variants ship with the crate:
//!
//! - [`ExplicitAssetProvider`]: a fixed list from settings.
//! - [`SelectionAssetProvider`]: the host's current selection.
//! - [`SearchAssetProvider`]: a query against the host asset index, narrowed
//!   by include/exclude path patterns.

mod search;
mod selection;

pub use search::SearchAssetProvider;
pub use selection::SelectionAssetProvider;

use crate::asset::AssetRef;
use crate::error::Result;

pub trait AssetProvider {
    /// Assets to check, in check order. An empty list means "nothing to do".
    ///
    /// # Errors
    /// Returns an error if the assets cannot be enumerated.
    fn get_assets(&self) -> Result<Vec<AssetRef>>;
}

/// Returns a configured list verbatim.
#[derive(Debug, Clone, Default)]
pub struct ExplicitAssetProvider {
    assets: Vec<AssetRef>,
}

impl ExplicitAssetProvider {
    #[must_use]
    pub const fn new(assets: Vec<AssetRef>) -> Self {
        Self { assets }
    }

    #[must_use]
    pub fn assets(&self) -> &[AssetRef] {
        &self.assets
    }
}

impl AssetProvider for ExplicitAssetProvider {
    fn get_assets(&self) -> Result<Vec<AssetRef>> {
        Ok(self.assets.clone())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
