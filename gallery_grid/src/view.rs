// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid view controller: item source, layout tiles, drag input and
//! post-release physics.

use core::fmt;
use core::ops::Range;
use core::time::Duration;
use std::rc::Rc;

use kurbo::{Point, Rect, Size, Vec2};
use tracing::{debug, trace};

use crate::physics::{self, ScrollFlags, ScrollState};
use crate::tiles::{self, CellAdapter, Line};
use crate::{
    AnimationTicker, Bounds, ConfigError, DragPhase, GridConfig, GridGeometry, PointerEvent,
    PointerEventKind, TapResult, TapState,
};

/// Something the owner of a [`GridView`] should react to.
#[derive(Clone, Debug, PartialEq)]
pub enum GridEvent<T> {
    /// A cell was tapped without an intervening drag.
    Selected {
        /// Index of the tapped item.
        index: usize,
        /// The tapped item.
        item: T,
    },
    /// The content was pushed past its trailing edge; load more items.
    ///
    /// Emitted once, then latched until the item source grows.
    ReachedEnd,
}

/// A scrollable grid over a shared item source.
///
/// The view is driven entirely by its owner:
/// - [`set_item_source`](Self::set_item_source) replaces the items and
///   rebuilds every cell through the [`CellAdapter`],
/// - [`on_viewport_resized`](Self::on_viewport_resized) supplies geometry,
/// - [`handle_pointer`](Self::handle_pointer) and
///   [`handle_click`](Self::handle_click) feed input,
/// - [`update`](Self::update) (or [`tick`](Self::tick) directly) advances the
///   post-release animation,
/// - [`drain_events`](Self::drain_events) returns selections and reach-end
///   signals.
pub struct GridView<T, A: CellAdapter<T>> {
    config: GridConfig,
    adapter: A,
    source: Option<Rc<[T]>>,
    lines: Vec<Line<A::Cell>>,
    viewport: Size,
    geometry: GridGeometry,
    bounds: Bounds,
    wait_for_more: bool,
    scroll: ScrollState,
    tap: TapState,
    ticker: AnimationTicker,
    events: Vec<GridEvent<T>>,
}

impl<T, A: CellAdapter<T>> fmt::Debug for GridView<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridView")
            .field("config", &self.config)
            .field("item_count", &self.source.as_ref().map_or(0, |items| items.len()))
            .field("line_count", &self.lines.len())
            .field("viewport", &self.viewport)
            .field("bounds", &self.bounds)
            .field("wait_for_more", &self.wait_for_more)
            .field("scroll", &self.scroll)
            .field("ticker", &self.ticker)
            .finish_non_exhaustive()
    }
}

impl<T: Clone, A: CellAdapter<T>> GridView<T, A> {
    /// Creates an empty grid after validating `config`.
    pub fn new(config: GridConfig, adapter: A) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            adapter,
            source: None,
            lines: Vec::new(),
            viewport: Size::ZERO,
            geometry: GridGeometry::new(
                config.constraint,
                config.constraint_count,
                config.margin,
                Size::ZERO,
                0,
            ),
            bounds: Bounds::ZERO,
            wait_for_more: false,
            scroll: ScrollState::default(),
            tap: TapState::new(),
            ticker: AnimationTicker::default(),
            events: Vec::new(),
        })
    }

    /// The configuration this grid was built with.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The cell adapter.
    #[must_use]
    pub const fn adapter(&self) -> &A {
        &self.adapter
    }

    // --- item source & tiles -------------------------------------------------

    /// Replaces the item source and rebuilds all lines and cells.
    ///
    /// A source longer than the previous one clears the reach-end latch.
    pub fn set_item_source(&mut self, source: Option<Rc<[T]>>) {
        let previous = self.item_count();
        let next = source.as_ref().map_or(0, |items| items.len());
        if next > previous {
            self.scroll.flags.remove(ScrollFlags::WAITING_FOR_MORE);
        }
        self.source = source;
        self.rebuild();
    }

    /// The current item source.
    #[must_use]
    pub fn item_source(&self) -> Option<&Rc<[T]>> {
        self.source.as_ref()
    }

    /// Number of items in the source.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.source.as_ref().map_or(0, |items| items.len())
    }

    /// The item at `index`.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&T> {
        self.source.as_ref()?.get(index)
    }

    /// All lines, in main-axis order.
    #[must_use]
    pub fn lines(&self) -> &[Line<A::Cell>] {
        &self.lines
    }

    /// The cell visual showing the item at `index`.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&A::Cell> {
        let per_line = self.config.constraint_count;
        if per_line == 0 {
            return None;
        }
        let line = self.lines.get(index / per_line)?;
        line.cells()
            .get(index % per_line)
            .map(tiles::Cell::visual)
    }

    fn rebuild(&mut self) {
        self.lines.clear();
        let per_line = self.config.constraint_count;
        if per_line != 0 {
            if let Some(items) = self.source.as_deref() {
                self.lines = tiles::build_lines(&mut self.adapter, items, per_line);
            }
        }
        debug!(
            items = self.item_count(),
            lines = self.lines.len(),
            "rebuilt grid tiles"
        );
        self.relayout();
    }

    // --- geometry ------------------------------------------------------------

    /// Recomputes bounds for a new viewport size.
    ///
    /// Negative or non-finite dimensions are treated as zero.
    pub fn on_viewport_resized(&mut self, size: Size) {
        let sanitize = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.viewport = Size::new(sanitize(size.width), sanitize(size.height));
        self.relayout();
    }

    fn relayout(&mut self) {
        let config = self.config;
        let axis = config.constraint;
        self.geometry = GridGeometry::new(
            axis,
            config.constraint_count,
            config.margin,
            self.viewport,
            self.lines.len(),
        );
        self.bounds = self.geometry.bounds();

        let content_main = axis.main_size(self.geometry.content_size());
        let main = if content_main <= axis.main_size(self.viewport) {
            0.0
        } else {
            let floor = if self.wait_for_more {
                axis.main(self.out_bounds().low)
            } else {
                axis.main(self.bounds.low)
            };
            axis.main(self.scroll.offset)
                .max(floor)
                .min(axis.main(self.bounds.high))
        };
        self.scroll.offset = axis.with_main(self.scroll.offset, main);
        debug!(
            viewport = ?self.viewport,
            content = ?self.geometry.content_size(),
            low = ?self.bounds.low,
            "grid geometry changed"
        );
    }

    /// Current viewport size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Geometry derived from the viewport and line count.
    #[must_use]
    pub const fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Size of the laid-out content.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.geometry.content_size()
    }

    /// Cross-axis viewport size divided by the number of cells per line.
    #[must_use]
    pub fn cell_extent(&self) -> f64 {
        self.geometry.cell_extent()
    }

    /// Number of cells that fit in the viewport, in whole lines.
    #[must_use]
    pub fn visible_item_count(&self) -> usize {
        self.geometry.visible_item_count()
    }

    /// Hard resting bounds of the offset.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Hard bounds extended by the elastic overscroll margin.
    #[must_use]
    pub fn out_bounds(&self) -> Bounds {
        self.bounds.outset(self.viewport)
    }

    /// Lines intersecting the viewport, grown by `overscan` on both ends.
    #[must_use]
    pub fn visible_lines(&self, overscan: f64) -> Range<usize> {
        self.geometry.visible_lines(self.scroll.offset, overscan)
    }

    /// Viewport-space rectangle of the cell showing item `index`.
    #[must_use]
    pub fn cell_rect(&self, index: usize) -> Option<Rect> {
        let per_line = self.config.constraint_count;
        if per_line == 0 || index >= self.item_count() {
            return None;
        }
        Some(
            self.geometry
                .cell_rect(index / per_line, index % per_line, self.scroll.offset),
        )
    }

    /// Index of the item whose cell contains `point` (viewport space).
    #[must_use]
    pub fn cell_at(&self, point: Point) -> Option<usize> {
        let (line, slot) = self.geometry.cell_at(point, self.scroll.offset)?;
        let index = line * self.config.constraint_count + slot;
        (index < self.item_count()).then_some(index)
    }

    // --- offset & clamping ---------------------------------------------------

    /// Whether the trailing edge accepts elastic slack for pending items.
    #[must_use]
    pub const fn wait_for_more(&self) -> bool {
        self.wait_for_more
    }

    /// Gives the trailing edge elastic slack (`true`) or makes it a hard stop.
    pub fn set_wait_for_more(&mut self, wait: bool) {
        self.wait_for_more = wait;
    }

    /// Enables or disables hard clamping on both edges.
    pub fn set_clamp_enabled(&mut self, enabled: bool) {
        self.scroll.flags.set(ScrollFlags::CLAMP_ENABLED, enabled);
    }

    /// Scroll state: offset, velocities, captured pointer and flags.
    #[must_use]
    pub const fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    /// Current content offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> Vec2 {
        self.scroll.offset
    }

    /// Whether the last press may still turn into a tap.
    #[must_use]
    pub const fn can_click(&self) -> bool {
        self.scroll.flags.contains(ScrollFlags::CAN_CLICK)
    }

    /// Range an offset write is clamped to.
    fn clamp_bounds(&self) -> Bounds {
        let axis = self.config.constraint;
        let out = self.out_bounds();
        let mut range = if self.scroll.flags.contains(ScrollFlags::CLAMP_ENABLED) {
            self.bounds
        } else {
            out
        };
        if self.wait_for_more {
            range.low = axis.with_main(range.low, axis.main(out.low));
        }
        range
    }

    /// Range the offset settles into once motion stops.
    fn resting_bounds(&self) -> Bounds {
        let axis = self.config.constraint;
        let mut range = self.bounds;
        if self.wait_for_more {
            range.low = axis.with_main(range.low, axis.main(self.out_bounds().low));
        }
        range
    }

    fn is_out_of_bounds(&self) -> bool {
        let axis = self.config.constraint;
        let rest = self.resting_bounds();
        let main = axis.main(self.scroll.offset);
        main < axis.main(rest.low) || main > axis.main(rest.high)
    }

    /// Sets the content offset, clamped to the active bounds.
    ///
    /// If the requested main-axis offset passes the trailing bound and the
    /// reach-end latch is clear, a [`GridEvent::ReachedEnd`] is queued and the
    /// latch is set. Returns the offset actually applied.
    pub fn set_scroll_offset(&mut self, offset: Vec2) -> Vec2 {
        let clamped = self.clamp_bounds().clamp(offset);
        self.scroll.offset = clamped;

        let axis = self.config.constraint;
        let past_end = axis.main(offset) < axis.main(self.bounds.low);
        if past_end && !self.scroll.flags.contains(ScrollFlags::WAITING_FOR_MORE) {
            self.scroll.flags.insert(ScrollFlags::WAITING_FOR_MORE);
            self.events.push(GridEvent::ReachedEnd);
            debug!(requested = ?offset, "grid reached end");
        }
        clamped
    }

    // --- pointer input -------------------------------------------------------

    /// Current phase of the drag state machine.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match self.scroll.pointer {
            Some(pointer) => DragPhase::Dragging(pointer),
            None if self.ticker.is_running() => DragPhase::PostRelease,
            None => DragPhase::Idle,
        }
    }

    /// Feeds a pointer event. Returns `true` if the grid consumed it.
    ///
    /// Events for pointers other than the captured one are ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => self.on_pointer_down(&event),
            PointerEventKind::Move => self.on_pointer_move(&event),
            kind if kind.is_release() => self.on_pointer_release(&event),
            _ => false,
        }
    }

    fn on_pointer_down(&mut self, event: &PointerEvent) -> bool {
        if !event.is_primary {
            return false;
        }
        if let Some(previous) = self.scroll.pointer.take() {
            // Hand the drag over without momentum.
            self.tap.cancel(previous);
            trace!(previous = previous.get(), "grid drag handed over");
        }
        let cell = self.cell_at(event.position);
        self.tap.on_down(event.pointer_id, cell);
        self.scroll.flags.set(ScrollFlags::CAN_CLICK, cell.is_some());

        self.ticker.pause();
        self.scroll.pointer = Some(event.pointer_id);
        self.scroll.stop();
        self.scroll.flags.insert(ScrollFlags::MOVEMENT_CAPABLE);
        trace!(pointer = event.pointer_id.get(), ?cell, "grid drag captured");
        true
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) -> bool {
        if self.scroll.pointer != Some(event.pointer_id)
            || !self.scroll.flags.contains(ScrollFlags::MOVEMENT_CAPABLE)
        {
            return false;
        }
        if event.delta != Vec2::ZERO {
            self.scroll.flags.remove(ScrollFlags::CAN_CLICK);
        }
        let axis = self.config.constraint;
        let requested = self.scroll.offset + axis.main_only(event.delta);
        self.set_scroll_offset(requested);
        true
    }

    fn on_pointer_release(&mut self, event: &PointerEvent) -> bool {
        if self.scroll.pointer != Some(event.pointer_id) {
            return false;
        }
        let axis = self.config.constraint;
        if event.kind == PointerEventKind::Cancel {
            self.tap.cancel(event.pointer_id);
        }
        self.scroll.pointer = None;
        self.scroll.flags.remove(ScrollFlags::MOVEMENT_CAPABLE);
        if event.delta != Vec2::ZERO {
            self.scroll.velocity = axis.main_only(event.delta);
        }
        self.scroll.spring_rate = 0.0;
        self.scroll.spring_velocity = self.initial_spring_velocity();
        self.ticker.start();
        trace!(
            pointer = event.pointer_id.get(),
            velocity = ?self.scroll.velocity,
            spring = ?self.scroll.spring_velocity,
            "grid drag released"
        );
        true
    }

    /// Feeds a click at `position`. Returns `true` if it selected a cell.
    ///
    /// The click selects only the cell that received the press, and only if
    /// no drag moved the content in between.
    pub fn handle_click(&mut self, position: Point) -> bool {
        let Some(cell) = self.cell_at(position) else {
            return false;
        };
        match self.tap.on_click(cell, self.can_click()) {
            TapResult::Tap(index) => {
                let Some(item) = self.item(index).cloned() else {
                    return false;
                };
                debug!(index, "grid cell selected");
                self.events.push(GridEvent::Selected { index, item });
                true
            }
            TapResult::Suppressed(_) => false,
        }
    }

    /// Takes the queued events.
    pub fn drain_events(&mut self) -> Vec<GridEvent<T>> {
        core::mem::take(&mut self.events)
    }

    // --- post-release physics ------------------------------------------------

    /// Advances the post-release animation by host frame time.
    ///
    /// Runs one physics tick per elapsed [`TICK_INTERVAL`](crate::TICK_INTERVAL)
    /// while the animation is running.
    pub fn update(&mut self, elapsed: Duration) {
        let due = self.ticker.advance(elapsed);
        let dt = self.ticker.period().as_secs_f64();
        for _ in 0..due {
            if !self.ticker.is_running() {
                break;
            }
            self.tick(dt);
        }
    }

    /// Runs one physics step of `elapsed_seconds`.
    ///
    /// Does nothing while a pointer is captured or for non-positive steps.
    /// Pauses the animation once both velocities are zero.
    pub fn tick(&mut self, elapsed_seconds: f64) {
        let usable = elapsed_seconds.is_finite() && elapsed_seconds > 0.0;
        if self.scroll.pointer.is_some() || !usable {
            return;
        }
        let axis = self.config.constraint;

        self.scroll.velocity = physics::decay_inertia(
            self.scroll.velocity,
            self.config.scroll_deceleration_rate,
            elapsed_seconds,
            self.is_out_of_bounds(),
        );

        let mut rate = self.scroll.spring_rate;
        self.scroll.spring_velocity = self.spring_displacement(&mut rate, elapsed_seconds);
        self.scroll.spring_rate = rate;

        let requested = self.scroll.offset + self.scroll.velocity + self.scroll.spring_velocity;
        let applied = self.set_scroll_offset(requested);
        if axis.main(applied) != axis.main(requested) {
            // Inertia ran into the clamp.
            self.scroll.velocity = Vec2::ZERO;
        }

        trace!(
            offset = ?self.scroll.offset,
            velocity = ?self.scroll.velocity,
            spring = ?self.scroll.spring_velocity,
            "grid tick"
        );
        if self.scroll.is_at_rest() {
            self.ticker.pause();
            trace!("grid settled");
        }
    }

    /// One smoothing step toward the violated resting bound, as a displacement.
    ///
    /// The cross-axis component is reserved and always zero.
    fn spring_displacement(&self, rate: &mut f64, dt: f64) -> Vec2 {
        let axis = self.config.constraint;
        let rest = self.resting_bounds();
        let main = axis.main(self.scroll.offset);
        let Some(target) =
            physics::spring_target(main, axis.main(rest.low), axis.main(rest.high))
        else {
            *rate = 0.0;
            return Vec2::ZERO;
        };
        let next = physics::smooth_damp(main, target, rate, self.config.elasticity, dt);
        axis.compose(next - main, 0.0)
    }

    fn initial_spring_velocity(&self) -> Vec2 {
        let mut rate = 0.0;
        self.spring_displacement(&mut rate, self.ticker.period().as_secs_f64())
    }
}
