// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap recognition for cells inside a draggable container.
//!
//! A press on a cell arms a tap; any drag displacement before the click
//! disarms it. The "can click" flag itself lives in the grid's scroll flags
//! because the drag handler owns it; this module tracks *which* cell was
//! pressed and by which pointer, and turns click events into tap results.
//!
//! ## Tap Rules
//!
//! 1. **Same Cell**: a click produces a tap only on the cell that was pressed.
//! 2. **Still Armed**: the caller's `can_click` flag must still be set.
//! 3. **One Tap Per Press**: the press is consumed by the click, tap or not.
//! 4. **No Active Press**: clicks without a preceding press are suppressed.
//!
//! ```
//! use core::num::NonZeroU64;
//! use gallery_grid::{TapResult, TapState};
//!
//! let pointer = NonZeroU64::new(1).unwrap();
//! let mut state = TapState::new();
//! state.on_down(pointer, Some(3));
//! assert_eq!(state.on_click(3, true), TapResult::Tap(3));
//!
//! // A drag in between disarms the tap.
//! state.on_down(pointer, Some(3));
//! assert_eq!(state.on_click(3, false), TapResult::Suppressed(Some(3)));
//! ```

use crate::PointerId;

/// An armed press on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Press {
    /// Pointer that pressed the cell.
    pub pointer: PointerId,
    /// Index of the pressed cell's item.
    pub cell: usize,
}

/// Result of click processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapResult {
    /// The cell at this index was tapped.
    Tap(usize),
    /// No tap; contains the pressed cell if there was one.
    Suppressed(Option<usize>),
}

/// Press tracking for tap recognition.
#[derive(Clone, Debug, Default)]
pub struct TapState {
    press: Option<Press>,
}

impl TapState {
    /// Creates a state with no press.
    #[must_use]
    pub const fn new() -> Self {
        Self { press: None }
    }

    /// Records a pointer down. `cell` is the cell under the pointer, if any.
    ///
    /// A down outside every cell clears any earlier press.
    pub fn on_down(&mut self, pointer: PointerId, cell: Option<usize>) {
        self.press = cell.map(|cell| Press { pointer, cell });
    }

    /// Processes a click on `cell`.
    ///
    /// `can_click` is the container's verdict on whether the press survived
    /// without a drag.
    pub fn on_click(&mut self, cell: usize, can_click: bool) -> TapResult {
        let Some(press) = self.press.take() else {
            return TapResult::Suppressed(None);
        };
        if press.cell != cell || !can_click {
            return TapResult::Suppressed(Some(press.cell));
        }
        TapResult::Tap(cell)
    }

    /// Drops the press held by `pointer`.
    ///
    /// Returns `true` if a press was dropped.
    pub fn cancel(&mut self, pointer: PointerId) -> bool {
        if self.press.is_some_and(|press| press.pointer == pointer) {
            self.press = None;
            true
        } else {
            false
        }
    }

    /// The current press, if any.
    #[must_use]
    pub const fn press(&self) -> Option<Press> {
        self.press
    }
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroU64;

    use super::*;

    fn pointer(id: u64) -> PointerId {
        NonZeroU64::new(id).unwrap()
    }

    #[test]
    fn press_then_click_on_same_cell_taps() {
        let mut state = TapState::new();
        state.on_down(pointer(1), Some(4));
        assert_eq!(state.on_click(4, true), TapResult::Tap(4));
        assert_eq!(state.press(), None);
    }

    #[test]
    fn click_on_other_cell_is_suppressed() {
        let mut state = TapState::new();
        state.on_down(pointer(1), Some(4));
        assert_eq!(state.on_click(5, true), TapResult::Suppressed(Some(4)));
        assert_eq!(state.press(), None);
    }

    #[test]
    fn disarmed_press_is_suppressed_and_consumed() {
        let mut state = TapState::new();
        state.on_down(pointer(1), Some(2));
        assert_eq!(state.on_click(2, false), TapResult::Suppressed(Some(2)));
        // The press is gone, so a later armed click still does nothing.
        assert_eq!(state.on_click(2, true), TapResult::Suppressed(None));
    }

    #[test]
    fn down_on_background_clears_press() {
        let mut state = TapState::new();
        state.on_down(pointer(1), Some(2));
        state.on_down(pointer(1), None);
        assert_eq!(state.on_click(2, true), TapResult::Suppressed(None));
    }

    #[test]
    fn cancel_only_affects_owning_pointer() {
        let mut state = TapState::new();
        state.on_down(pointer(1), Some(7));
        assert!(!state.cancel(pointer(2)));
        assert!(state.cancel(pointer(1)));
        assert_eq!(state.press(), None);
    }
}
