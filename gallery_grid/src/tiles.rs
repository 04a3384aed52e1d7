// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout tiles: lines of bound cells generated from an item source.
//!
//! The scroll axis operates over *lines* (rows in a column-constrained grid,
//! columns in a row-constrained grid) while the item source is indexed as a
//! flat sequence. Item `i` lives in line `i / constraint_count`, slot
//! `i % constraint_count`.

use core::fmt;

use smallvec::SmallVec;

/// Capability interface used by a [`GridView`](crate::GridView) to produce
/// and populate cell visuals.
///
/// The adapter is fixed for the lifetime of the view.
pub trait CellAdapter<T> {
    /// The host's cell visual.
    type Cell;

    /// Creates an empty cell visual.
    fn make_cell(&mut self) -> Self::Cell;

    /// Applies `item` to `cell`.
    fn bind_cell(&mut self, cell: &mut Self::Cell, item: &T);
}

/// A [`CellAdapter`] built from a pair of closures.
pub struct FnCellAdapter<M, B> {
    make: M,
    bind: B,
}

impl<M, B> FnCellAdapter<M, B> {
    /// Wraps a cell factory and a bind function.
    pub fn new(make: M, bind: B) -> Self {
        Self { make, bind }
    }
}

impl<M, B> fmt::Debug for FnCellAdapter<M, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCellAdapter").finish_non_exhaustive()
    }
}

impl<T, C, M, B> CellAdapter<T> for FnCellAdapter<M, B>
where
    M: FnMut() -> C,
    B: FnMut(&mut C, &T),
{
    type Cell = C;

    fn make_cell(&mut self) -> C {
        (self.make)()
    }

    fn bind_cell(&mut self, cell: &mut C, item: &T) {
        (self.bind)(cell, item);
    }
}

/// A bound cell and the index of the item it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<C> {
    index: usize,
    visual: C,
}

impl<C> Cell<C> {
    /// Index of the item in the source.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The host's cell visual.
    #[must_use]
    pub const fn visual(&self) -> &C {
        &self.visual
    }
}

/// One row or column of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<C> {
    cells: SmallVec<[Cell<C>; 4]>,
}

impl<C> Line<C> {
    fn new() -> Self {
        Self {
            cells: SmallVec::new(),
        }
    }

    /// Cells in this line, in source order.
    #[must_use]
    pub fn cells(&self) -> &[Cell<C>] {
        &self.cells
    }

    /// Number of cells in this line.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if this line holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Number of lines needed for `len` items at `per_line` items each.
#[must_use]
pub const fn line_count(len: usize, per_line: usize) -> usize {
    if per_line == 0 { 0 } else { len.div_ceil(per_line) }
}

/// Creates one cell per item and distributes them over lines.
///
/// Returns no lines when `per_line` is zero.
pub(crate) fn build_lines<T, A>(adapter: &mut A, items: &[T], per_line: usize) -> Vec<Line<A::Cell>>
where
    A: CellAdapter<T>,
{
    if per_line == 0 {
        return Vec::new();
    }
    let mut lines: Vec<Line<A::Cell>> = (0..line_count(items.len(), per_line))
        .map(|_| Line::new())
        .collect();
    for (index, item) in items.iter().enumerate() {
        let mut visual = adapter.make_cell();
        adapter.bind_cell(&mut visual, item);
        lines[index / per_line].cells.push(Cell { index, visual });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> FnCellAdapter<impl FnMut() -> String, impl FnMut(&mut String, &u32)> {
        FnCellAdapter::new(String::new, |cell: &mut String, item: &u32| {
            *cell = item.to_string();
        })
    }

    #[test]
    fn line_count_rounds_up() {
        assert_eq!(line_count(0, 2), 0);
        assert_eq!(line_count(5, 2), 3);
        assert_eq!(line_count(6, 3), 2);
        assert_eq!(line_count(7, 0), 0);
    }

    #[test]
    fn five_items_two_per_line() {
        let mut adapter = labels();
        let lines = build_lines(&mut adapter, &[10_u32, 11, 12, 13, 14], 2);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 2);
        assert_eq!(lines[2].len(), 1);
        assert_eq!(lines[2].cells()[0].index(), 4);
        assert_eq!(lines[2].cells()[0].visual(), "14");
    }

    #[test]
    fn zero_per_line_builds_nothing() {
        let mut adapter = labels();
        let lines = build_lines(&mut adapter, &[1_u32, 2, 3], 0);
        assert!(lines.is_empty(), "zero cells per line lays out nothing");
        let lines = build_lines(&mut adapter, &[] as &[u32], 0);
        assert!(lines.is_empty(), "empty source lays out nothing");
    }
}
