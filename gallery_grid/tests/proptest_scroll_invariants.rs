// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for grid scrolling.
//!
//! These tests verify invariants that must hold for any gesture sequence:
//!
//! 1. The offset never leaves the active clamp range.
//! 2. Reach-end fires at most once until the item source grows.
//! 3. Replacing the source with itself is idempotent.
//! 4. Line construction matches `ceil(len / per_line)` with only the last line short.
//! 5. After release the grid settles inside its resting bounds.

use core::num::NonZeroU64;
use core::time::Duration;
use std::rc::Rc;

use gallery_grid::{
    DragPhase, FnCellAdapter, GridConfig, GridConstraint, GridEvent, GridView, PointerEvent,
    TICK_INTERVAL, line_count,
};
use kurbo::{Point, Size, Vec2};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

type Labels = FnCellAdapter<fn() -> u32, fn(&mut u32, &u32)>;

fn bind(cell: &mut u32, item: &u32) {
    *cell = *item;
}

fn grid(constraint: GridConstraint, per_line: usize, items: u32) -> GridView<u32, Labels> {
    let config = GridConfig {
        constraint,
        constraint_count: per_line,
        ..GridConfig::default()
    };
    let adapter: Labels = FnCellAdapter::new(
        u32::default as fn() -> u32,
        bind as fn(&mut u32, &u32),
    );
    let mut grid = GridView::new(config, adapter).unwrap();
    grid.on_viewport_resized(Size::new(360.0, 640.0));
    grid.set_item_source(source(items));
    grid
}

fn source(items: u32) -> Option<Rc<[u32]>> {
    Some((0..items).collect::<Vec<_>>().into())
}

#[derive(Clone, Debug)]
enum Op {
    Down,
    Move(f64),
    Up(f64),
    Tick(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Down),
        (-300.0f64..300.0).prop_map(Op::Move),
        (-120.0f64..120.0).prop_map(Op::Up),
        (0u64..120).prop_map(Op::Tick),
    ]
}

fn constraint() -> impl Strategy<Value = GridConstraint> {
    prop_oneof![
        Just(GridConstraint::ColumnFixedCount),
        Just(GridConstraint::RowFixedCount)
    ]
}

fn apply(grid: &mut GridView<u32, Labels>, op: &Op) {
    let id = NonZeroU64::new(1).unwrap();
    let at = Point::new(20.0, 20.0);
    let axis = grid.config().constraint;
    let along = |d: f64| axis.compose(d, d / 2.0);
    match *op {
        Op::Down => {
            grid.handle_pointer(PointerEvent::down(id, at));
        }
        Op::Move(d) => {
            let delta = along(d);
            grid.handle_pointer(PointerEvent::moved(id, at, delta));
        }
        Op::Up(d) => {
            let delta = along(d);
            grid.handle_pointer(PointerEvent::up(id, at, delta));
        }
        Op::Tick(ms) => grid.update(Duration::from_millis(ms)),
    }
}

fn settle(grid: &mut GridView<u32, Labels>) -> bool {
    for _ in 0..2_000 {
        if grid.phase() == DragPhase::Idle {
            return true;
        }
        grid.update(TICK_INTERVAL);
    }
    false
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Offset stays inside the clamp range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offset_stays_in_clamp_range(
        axis in constraint(),
        items in 0u32..60,
        wait in any::<bool>(),
        ops in proptest::collection::vec(op(), 1..80),
    ) {
        let mut grid = grid(axis, 3, items);
        grid.set_wait_for_more(wait);
        let hard = grid.bounds();
        let out = grid.out_bounds();
        let floor = if wait { axis.main(out.low) } else { axis.main(hard.low) };

        for op in &ops {
            apply(&mut grid, op);
            let offset = grid.scroll_offset();
            let main = axis.main(offset);
            prop_assert!(
                main >= floor && main <= axis.main(hard.high),
                "main offset {} escaped [{}, {}] after {:?}", main, floor, axis.main(hard.high), op
            );
            prop_assert_eq!(axis.cross(offset), 0.0, "cross axis must not move");
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Reach-end fires at most once per source length
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reach_end_fires_at_most_once(
        items in 1u32..40,
        wait in any::<bool>(),
        ops in proptest::collection::vec(op(), 1..120),
    ) {
        let mut grid = grid(GridConstraint::ColumnFixedCount, 2, items);
        grid.set_wait_for_more(wait);
        let mut reached = 0;
        for op in &ops {
            apply(&mut grid, op);
            reached += grid
                .drain_events()
                .iter()
                .filter(|event| matches!(event, GridEvent::ReachedEnd))
                .count();
        }
        prop_assert!(reached <= 1, "reach-end fired {} times", reached);

        // Same-length replacement keeps the latch.
        grid.set_item_source(source(items));
        grid.set_scroll_offset(Vec2::new(0.0, -1.0e6));
        let again = grid.drain_events();
        if reached == 1 {
            prop_assert!(again.is_empty());
        } else {
            prop_assert_eq!(again, vec![GridEvent::ReachedEnd]);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Rebuild is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rebuild_is_idempotent(
        axis in constraint(),
        per_line in 1usize..6,
        items in 0u32..80,
        scroll in -2_000.0f64..0.0,
    ) {
        let mut grid = grid(axis, per_line, items);
        grid.set_scroll_offset(axis.compose(scroll, 0.0));
        let snapshot = |grid: &GridView<u32, Labels>| -> Vec<Vec<(usize, u32)>> {
            grid.lines()
                .iter()
                .map(|line| line.cells().iter().map(|c| (c.index(), *c.visual())).collect())
                .collect()
        };
        let lines = snapshot(&grid);
        let offset = grid.scroll_offset();
        let same = grid.item_source().cloned();

        grid.set_item_source(same.clone());
        grid.set_item_source(same);
        prop_assert_eq!(snapshot(&grid), lines);
        prop_assert_eq!(grid.scroll_offset(), offset);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Line construction
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lines_cover_every_item_once(per_line in 1usize..8, items in 0u32..100) {
        let grid = grid(GridConstraint::ColumnFixedCount, per_line, items);
        let lines = grid.lines();
        prop_assert_eq!(lines.len(), line_count(items as usize, per_line));
        for (i, line) in lines.iter().enumerate() {
            if i + 1 < lines.len() {
                prop_assert_eq!(line.len(), per_line);
            } else {
                prop_assert!(!line.is_empty() && line.len() <= per_line);
            }
        }
        let indices: Vec<usize> = lines
            .iter()
            .flat_map(|line| line.cells().iter().map(|c| c.index()))
            .collect();
        prop_assert_eq!(indices, (0..items as usize).collect::<Vec<_>>());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Release settles inside the resting bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn release_settles_inside_resting_bounds(
        items in 0u32..60,
        clamp in any::<bool>(),
        drag in -400.0f64..400.0,
        fling in -120.0f64..120.0,
    ) {
        let mut grid = grid(GridConstraint::ColumnFixedCount, 3, items);
        grid.set_clamp_enabled(clamp);
        for op in [Op::Down, Op::Move(drag), Op::Up(fling)] {
            apply(&mut grid, &op);
        }
        prop_assert!(settle(&mut grid), "grid never settled: {:?}", grid);
        prop_assert!(grid.scroll_state().is_at_rest());
        prop_assert!(
            grid.bounds().contains(grid.scroll_offset()),
            "settled at {:?} outside {:?}", grid.scroll_offset(), grid.bounds()
        );
    }
}
