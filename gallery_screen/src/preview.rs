// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full-screen preview of a selected item.

use crate::{Bitmap, ItemHandle};

/// Orientation the host should apply to the device screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScreenOrientation {
    /// Locked upright; used while browsing the grid.
    #[default]
    Portrait,
    /// Follows the device; used while previewing.
    AutoRotation,
}

/// Overlay showing one item over the grid.
#[derive(Clone, Debug, Default)]
pub struct PreviewOverlay {
    item: Option<ItemHandle>,
    orientation: ScreenOrientation,
}

impl PreviewOverlay {
    /// Shows `item` and unlocks rotation.
    pub fn show(&mut self, item: ItemHandle) {
        self.item = Some(item);
        self.orientation = ScreenOrientation::AutoRotation;
    }

    /// Hides the overlay and locks portrait. Returns `false` if it was already hidden.
    pub fn close(&mut self) -> bool {
        self.orientation = ScreenOrientation::Portrait;
        self.item.take().is_some()
    }

    /// Whether the overlay is showing.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.item.is_some()
    }

    /// The previewed item.
    #[must_use]
    pub const fn item(&self) -> Option<&ItemHandle> {
        self.item.as_ref()
    }

    /// The previewed image, if the item has one.
    #[must_use]
    pub fn image(&self) -> Option<Bitmap> {
        self.item.as_ref()?.image()
    }

    /// Requested screen orientation.
    #[must_use]
    pub const fn orientation(&self) -> ScreenOrientation {
        self.orientation
    }
}
