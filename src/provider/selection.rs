use std::rc::Rc;

use crate::asset::{AssetRef, SelectionModes, SelectionSource};
use crate::error::Result;

use super::AssetProvider;

/// Checks whatever the host currently has selected.
pub struct SelectionAssetProvider {
    source: Rc<dyn SelectionSource>,
    modes: SelectionModes,
}

impl SelectionAssetProvider {
    #[must_use]
    pub fn new(source: Rc<dyn SelectionSource>, modes: SelectionModes) -> Self {
        Self { source, modes }
    }

    #[must_use]
    pub const fn modes(&self) -> SelectionModes {
        self.modes
    }
}

impl AssetProvider for SelectionAssetProvider {
    fn get_assets(&self) -> Result<Vec<AssetRef>> {
        Ok(self.source.filtered(self.modes))
    }
}
