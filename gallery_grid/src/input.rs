// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events consumed by the grid and the drag phase they drive.

use core::num::NonZeroU64;

use kurbo::{Point, Vec2};

/// Pointer identifier for correlating down, move and release events.
pub type PointerId = NonZeroU64;

/// What happened to the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Pointer lifted.
    Up,
    /// The platform cancelled the gesture.
    Cancel,
    /// The pointer left the grid.
    Leave,
    /// The pointer moved onto another element.
    Out,
}

impl PointerEventKind {
    /// Returns `true` for every kind that ends a drag.
    #[must_use]
    pub const fn is_release(self) -> bool {
        matches!(self, Self::Up | Self::Cancel | Self::Leave | Self::Out)
    }
}

/// A pointer event in viewport space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer that produced the event.
    pub pointer_id: PointerId,
    /// Event kind.
    pub kind: PointerEventKind,
    /// Whether this is the primary pointer (first finger, left mouse button).
    pub is_primary: bool,
    /// Pointer position.
    pub position: Point,
    /// Movement since the previous event of this pointer.
    pub delta: Vec2,
}

impl PointerEvent {
    /// A primary pointer event with no movement.
    #[must_use]
    pub const fn new(pointer_id: PointerId, kind: PointerEventKind, position: Point) -> Self {
        Self {
            pointer_id,
            kind,
            is_primary: true,
            position,
            delta: Vec2::ZERO,
        }
    }

    /// A primary pointer press.
    #[must_use]
    pub const fn down(pointer_id: PointerId, position: Point) -> Self {
        Self::new(pointer_id, PointerEventKind::Down, position)
    }

    /// A primary pointer move by `delta`, ending at `position`.
    #[must_use]
    pub const fn moved(pointer_id: PointerId, position: Point, delta: Vec2) -> Self {
        Self::new(pointer_id, PointerEventKind::Move, position).with_delta(delta)
    }

    /// A primary pointer lift whose last frame moved by `delta`.
    #[must_use]
    pub const fn up(pointer_id: PointerId, position: Point, delta: Vec2) -> Self {
        Self::new(pointer_id, PointerEventKind::Up, position).with_delta(delta)
    }

    /// Replaces the movement delta.
    #[must_use]
    pub const fn with_delta(mut self, delta: Vec2) -> Self {
        self.delta = delta;
        self
    }

    /// Marks the event as coming from a secondary pointer.
    #[must_use]
    pub const fn secondary(mut self) -> Self {
        self.is_primary = false;
        self
    }
}

/// Phase of the grid's drag state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// Nothing is moving.
    Idle,
    /// A pointer is captured and drives the offset directly.
    Dragging(PointerId),
    /// Momentum and spring-back are animating after a release.
    PostRelease,
}
