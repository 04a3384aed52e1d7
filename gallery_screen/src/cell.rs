// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thumbnail cells bound to gallery items.

use gallery_grid::CellAdapter;

use crate::{Bitmap, ItemHandle};

/// Visual state of one thumbnail cell.
#[derive(Clone, Debug, Default)]
pub struct ThumbnailCell {
    background: Option<Bitmap>,
}

impl ThumbnailCell {
    /// The background image, absent while loading or after a failed fetch.
    #[must_use]
    pub fn background(&self) -> Option<&Bitmap> {
        self.background.as_ref()
    }
}

/// Creates empty [`ThumbnailCell`]s and binds item images into them.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThumbnailCells;

impl CellAdapter<ItemHandle> for ThumbnailCells {
    type Cell = ThumbnailCell;

    fn make_cell(&mut self) -> ThumbnailCell {
        ThumbnailCell::default()
    }

    fn bind_cell(&mut self, cell: &mut ThumbnailCell, item: &ItemHandle) {
        cell.background = item.image();
    }
}
