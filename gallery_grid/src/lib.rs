// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery Grid: a touch-driven scrollable grid with momentum and spring-back.
//!
//! This crate provides a small, renderer-agnostic grid controller for galleries
//! of uniformly sized cells. Items are laid out in fixed-length *lines* (rows of
//! a vertically scrolling grid, or columns of a horizontally scrolling one) and
//! the whole content is moved by a 2D offset.
//!
//! The core concepts are:
//!
//! - [`GridConfig`]: immutable layout and physics parameters, validated once by
//!   [`GridView::new`].
//! - [`CellAdapter`]: how the host creates an empty cell visual and binds an
//!   item into it. [`FnCellAdapter`] wraps a pair of closures.
//! - [`GridGeometry`] and [`Bounds`]: cell extents, content size, the legal
//!   resting range of the offset and its elastic out-bounds.
//! - [`GridView`]: the controller. It owns the scroll state, runs the
//!   `Idle → Dragging → PostRelease` pointer state machine, tells taps apart
//!   from drags, and queues [`GridEvent`]s for the host.
//! - [`AnimationTicker`]: the fixed-cadence clock behind post-release momentum
//!   and spring-back.
//!
//! Offsets are content translations: scrolling toward the end of the content
//! makes the main-axis offset more negative, so the trailing edge is the *low*
//! bound on both axes. Pushing past it emits [`GridEvent::ReachedEnd`] once;
//! the signal re-arms only after the item source grows.
//!
//! This crate deliberately does **not** draw anything. Host frameworks are
//! responsible for:
//!
//! - Calling [`GridView::on_viewport_resized`] after layout.
//! - Forwarding pointer events and clicks.
//! - Calling [`GridView::update`] every frame and positioning cells with
//!   [`GridView::cell_rect`] for the lines in [`GridView::visible_lines`].
//! - Draining [`GridView::drain_events`] and reacting to selections and
//!   reach-end signals.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::num::NonZeroU64;
//! use std::rc::Rc;
//!
//! use gallery_grid::{FnCellAdapter, GridConfig, GridEvent, GridView, PointerEvent};
//! use kurbo::{Point, Size, Vec2};
//!
//! let adapter = FnCellAdapter::new(String::new, |cell: &mut String, item: &u32| {
//!     *cell = format!("#{item}");
//! });
//! let mut grid = GridView::new(GridConfig::default(), adapter).unwrap();
//! grid.on_viewport_resized(Size::new(400.0, 800.0));
//! grid.set_item_source(Some((0..20).collect::<Vec<u32>>().into()));
//!
//! // Drag the content up far enough to hit the trailing edge.
//! let id = NonZeroU64::new(1).unwrap();
//! let at = Point::new(100.0, 100.0);
//! grid.handle_pointer(PointerEvent::down(id, at));
//! grid.handle_pointer(PointerEvent::moved(id, at, Vec2::new(0.0, -5000.0)));
//! grid.handle_pointer(PointerEvent::up(id, at, Vec2::ZERO));
//!
//! assert_eq!(grid.drain_events(), vec![GridEvent::ReachedEnd]);
//! assert_eq!(grid.scroll_offset(), grid.bounds().low);
//! ```

mod config;
mod geometry;
mod input;
mod physics;
mod tap;
mod ticker;
mod tiles;
mod view;

pub use config::{ConfigError, GridConfig, GridConstraint};
pub use geometry::{Bounds, GridGeometry, OUT_BOUND_FRACTION};
pub use input::{DragPhase, PointerEvent, PointerEventKind, PointerId};
pub use physics::{
    SPRING_SNAP_DISTANCE, ScrollFlags, ScrollState, VELOCITY_STOP_THRESHOLD, decay_inertia,
    smooth_damp, spring_target,
};
pub use tap::{Press, TapResult, TapState};
pub use ticker::{AnimationTicker, MAX_CATCH_UP_TICKS, TICK_INTERVAL};
pub use tiles::{Cell, CellAdapter, FnCellAdapter, Line, line_count};
pub use view::{GridEvent, GridView};
