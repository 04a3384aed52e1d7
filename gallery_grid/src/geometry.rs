// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll bounds and cell geometry for a laid-out grid.
//!
//! Offsets in this crate are *content translations*: the content origin sits
//! at `offset` in viewport space. On each axis the legal range is
//! `[min(0, viewport - content), 0]`, so scrolling toward the trailing edge of
//! the content drives the main-axis offset toward the low bound.

use core::ops::Range;

use kurbo::{Point, Rect, Size, Vec2};

use crate::GridConstraint;

/// Fraction of the viewport that elastic overscroll may extend past the hard bounds.
pub const OUT_BOUND_FRACTION: f64 = 0.1;

/// A pair of corner offsets describing a legal offset range on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest allowed offset on each axis.
    pub low: Vec2,
    /// Largest allowed offset on each axis.
    pub high: Vec2,
}

impl Bounds {
    /// Bounds that only admit the zero offset.
    pub const ZERO: Self = Self {
        low: Vec2::ZERO,
        high: Vec2::ZERO,
    };

    /// Resting bounds for `content` shown through `viewport`.
    #[must_use]
    pub fn for_content(viewport: Size, content: Size) -> Self {
        Self {
            low: Vec2::new(
                (viewport.width - content.width).min(0.0),
                (viewport.height - content.height).min(0.0),
            ),
            high: Vec2::ZERO,
        }
    }

    /// Extends both corners by [`OUT_BOUND_FRACTION`] of the viewport size.
    #[must_use]
    pub fn outset(self, viewport: Size) -> Self {
        let slack = Vec2::new(
            viewport.width * OUT_BOUND_FRACTION,
            viewport.height * OUT_BOUND_FRACTION,
        );
        Self {
            low: self.low - slack,
            high: self.high + slack,
        }
    }

    /// Returns `true` if `offset` lies inside the bounds (inclusive).
    #[must_use]
    pub fn contains(&self, offset: Vec2) -> bool {
        offset.x >= self.low.x
            && offset.x <= self.high.x
            && offset.y >= self.low.y
            && offset.y <= self.high.y
    }

    /// Clamps `offset` into the bounds, axis by axis.
    #[must_use]
    pub fn clamp(&self, offset: Vec2) -> Vec2 {
        Vec2::new(
            offset.x.max(self.low.x).min(self.high.x),
            offset.y.max(self.low.y).min(self.high.y),
        )
    }
}

/// Geometry of a grid with a known viewport and line count.
///
/// Every line is `cell_extent` long on the main axis. Cells are squares of
/// side `cell_extent - margin`, centered in their slot, and the whole content
/// is inset by `margin / 3` on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    constraint: GridConstraint,
    constraint_count: usize,
    margin: f64,
    viewport: Size,
    line_count: usize,
}

impl GridGeometry {
    /// Creates the geometry for `line_count` lines inside `viewport`.
    #[must_use]
    pub fn new(
        constraint: GridConstraint,
        constraint_count: usize,
        margin: f64,
        viewport: Size,
        line_count: usize,
    ) -> Self {
        Self {
            constraint,
            constraint_count,
            margin: margin.max(0.0),
            viewport,
            line_count,
        }
    }

    /// The viewport this geometry was computed for.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Number of lines (rows or columns) in the content.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    /// Cross-axis viewport size divided by the number of cells per line.
    ///
    /// Zero for an inert grid.
    #[must_use]
    pub fn cell_extent(&self) -> f64 {
        if self.constraint_count == 0 {
            return 0.0;
        }
        self.constraint.cross_size(self.viewport) / self.constraint_count as f64
    }

    /// Number of cells needed to fill the viewport, rounded up to whole lines.
    #[must_use]
    pub fn visible_item_count(&self) -> usize {
        let extent = self.cell_extent();
        if extent <= 0.0 {
            return 0;
        }
        let lines = (self.constraint.main_size(self.viewport) / extent).ceil();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Line counts are small and non-negative; the cast saturates."
        )]
        let lines = lines as usize;
        lines.saturating_mul(self.constraint_count)
    }

    /// Inset applied around the content on every side.
    #[must_use]
    pub fn padding(&self) -> f64 {
        self.margin / 3.0
    }

    /// Size of a single cell.
    #[must_use]
    pub fn cell_size(&self) -> Size {
        let side = (self.cell_extent() - self.margin).max(0.0);
        Size::new(side, side)
    }

    /// Total size of the laid-out content.
    #[must_use]
    pub fn content_size(&self) -> Size {
        let main = self.line_count as f64 * self.cell_extent() + 2.0 * self.padding();
        let cross = self.constraint.cross_size(self.viewport);
        let v = self.constraint.compose(main, cross);
        Size::new(v.x, v.y)
    }

    /// Hard resting bounds of the content offset.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::for_content(self.viewport, self.content_size())
    }

    /// Cross-axis length of one slot in a line.
    fn slot_extent(&self) -> f64 {
        if self.constraint_count == 0 {
            return 0.0;
        }
        let available = self.constraint.cross_size(self.viewport) - 2.0 * self.padding();
        available.max(0.0) / self.constraint_count as f64
    }

    /// Rectangle of the cell at (`line`, `slot`), in viewport space for the given `offset`.
    #[must_use]
    pub fn cell_rect(&self, line: usize, slot: usize, offset: Vec2) -> Rect {
        let extent = self.cell_extent();
        let side = self.cell_size().width;
        let main_center = self.padding() + (line as f64 + 0.5) * extent;
        let cross_center = self.padding() + (slot as f64 + 0.5) * self.slot_extent();
        let center = self.constraint.compose(main_center, cross_center) + offset;
        Rect::from_center_size(center.to_point(), Size::new(side, side))
    }

    /// Lines intersecting the viewport grown by `overscan` on both main-axis ends.
    #[must_use]
    pub fn visible_lines(&self, offset: Vec2, overscan: f64) -> Range<usize> {
        let extent = self.cell_extent();
        if extent <= 0.0 || self.line_count == 0 {
            return 0..0;
        }
        let overscan = overscan.max(0.0);
        let scrolled = -self.constraint.main(offset);
        let view_start = scrolled - overscan - self.padding();
        let view_end = scrolled + self.constraint.main_size(self.viewport) + overscan
            - self.padding();

        let first = (view_start / extent).floor().max(0.0);
        let last = (view_end / extent).ceil().max(0.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Both values are non-negative line indices; the cast saturates."
        )]
        let (first, last) = (first as usize, last as usize);
        let end = last.min(self.line_count);
        first.min(end)..end
    }

    /// Finds the (`line`, `slot`) whose cell contains `point` (viewport space).
    ///
    /// Points in the margin between cells do not hit anything.
    #[must_use]
    pub fn cell_at(&self, point: Point, offset: Vec2) -> Option<(usize, usize)> {
        let extent = self.cell_extent();
        let slot_extent = self.slot_extent();
        if extent <= 0.0 || slot_extent <= 0.0 {
            return None;
        }
        let local = point.to_vec2() - offset;
        let main = self.constraint.main(local) - self.padding();
        let cross = self.constraint.cross(local) - self.padding();
        if main < 0.0 || cross < 0.0 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Both values are non-negative and bounded by the checks below."
        )]
        let (line, slot) = ((main / extent) as usize, (cross / slot_extent) as usize);
        if line >= self.line_count || slot >= self.constraint_count {
            return None;
        }
        self.cell_rect(line, slot, offset)
            .contains(point)
            .then_some((line, slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_geometry(lines: usize) -> GridGeometry {
        // 2 columns across 400 units: 200 unit lines, 198 unit cells.
        GridGeometry::new(
            GridConstraint::ColumnFixedCount,
            2,
            3.0,
            Size::new(400.0, 1000.0),
            lines,
        )
    }

    #[test]
    fn bounds_follow_content_overflow() {
        let bounds = Bounds::for_content(Size::new(500.0, 1000.0), Size::new(500.0, 1200.0));
        assert_eq!(bounds.low, Vec2::new(0.0, -200.0));
        assert_eq!(bounds.high, Vec2::ZERO);
        assert_eq!(bounds.clamp(Vec2::new(0.0, -250.0)), Vec2::new(0.0, -200.0));

        // Content smaller than the viewport pins the offset at zero.
        let fits = Bounds::for_content(Size::new(500.0, 1000.0), Size::new(500.0, 400.0));
        assert_eq!(fits, Bounds::ZERO);
    }

    #[test]
    fn outset_extends_by_a_tenth_of_the_viewport() {
        let bounds = Bounds {
            low: Vec2::new(0.0, -200.0),
            high: Vec2::ZERO,
        };
        let out = bounds.outset(Size::new(500.0, 1000.0));
        assert_eq!(out.low, Vec2::new(-50.0, -300.0));
        assert_eq!(out.high, Vec2::new(50.0, 100.0));
        assert!(out.contains(Vec2::new(0.0, -250.0)));
        assert!(!bounds.contains(Vec2::new(0.0, -250.0)));
    }

    #[test]
    fn extents_and_counts() {
        let geometry = column_geometry(3);
        assert_eq!(geometry.cell_extent(), 200.0);
        assert_eq!(geometry.cell_size(), Size::new(197.0, 197.0));
        assert_eq!(geometry.padding(), 1.0);
        // ceil(1000 / 200) = 5 lines of 2 cells.
        assert_eq!(geometry.visible_item_count(), 10);
        assert_eq!(geometry.content_size(), Size::new(400.0, 602.0));
    }

    #[test]
    fn inert_geometry_is_empty() {
        let geometry = GridGeometry::new(
            GridConstraint::ColumnFixedCount,
            0,
            2.0,
            Size::new(400.0, 800.0),
            0,
        );
        assert_eq!(geometry.cell_extent(), 0.0);
        assert_eq!(geometry.visible_item_count(), 0);
        assert_eq!(geometry.visible_lines(Vec2::ZERO, 100.0), 0..0);
        assert_eq!(geometry.cell_at(Point::new(10.0, 10.0), Vec2::ZERO), None);
    }

    #[test]
    fn visible_lines_track_offset_and_overscan() {
        let geometry = column_geometry(20);
        assert_eq!(geometry.visible_lines(Vec2::ZERO, 0.0), 0..5);
        // Scrolled by two and a half lines.
        assert_eq!(geometry.visible_lines(Vec2::new(0.0, -500.0), 0.0), 2..8);
        // Overscan of one line on each side.
        assert_eq!(geometry.visible_lines(Vec2::new(0.0, -500.0), 200.0), 1..9);
        // Past the end clamps to the last line.
        assert_eq!(geometry.visible_lines(Vec2::new(0.0, -3800.0), 0.0), 18..20);
    }

    #[test]
    fn hit_testing_maps_points_to_cells() {
        let geometry = column_geometry(3);
        // Center of line 1, slot 1.
        let rect = geometry.cell_rect(1, 1, Vec2::ZERO);
        assert_eq!(geometry.cell_at(rect.center(), Vec2::ZERO), Some((1, 1)));

        // Scrolling moves the cell with the content.
        let offset = Vec2::new(0.0, -200.0);
        let scrolled = geometry.cell_rect(1, 1, offset);
        assert_eq!(scrolled.center().y, rect.center().y - 200.0);
        assert_eq!(geometry.cell_at(scrolled.center(), offset), Some((1, 1)));

        // Below the last line hits nothing.
        assert_eq!(geometry.cell_at(Point::new(100.0, 900.0), Vec2::ZERO), None);
    }

    #[test]
    fn row_constraint_scrolls_horizontally() {
        let geometry = GridGeometry::new(
            GridConstraint::RowFixedCount,
            2,
            0.0,
            Size::new(1000.0, 400.0),
            10,
        );
        assert_eq!(geometry.cell_extent(), 200.0);
        assert_eq!(geometry.content_size(), Size::new(2000.0, 400.0));
        assert_eq!(geometry.bounds().low, Vec2::new(-1000.0, 0.0));
        let rect = geometry.cell_rect(3, 0, Vec2::ZERO);
        assert_eq!(rect.center(), Point::new(700.0, 100.0));
    }
}
