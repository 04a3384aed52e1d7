// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll state plus the inertia and spring-back math applied after a release.
//!
//! Both velocities are expressed in layout units per tick: the scroll
//! velocity is seeded from the last drag delta and the spring-back velocity is
//! the displacement of one smoothing step. Inertia decays exponentially with
//! elapsed time, so it is independent of the tick rate.

use bitflags::bitflags;
use kurbo::Vec2;

use crate::PointerId;

/// Inertia below this speed (units per tick) stops immediately.
pub const VELOCITY_STOP_THRESHOLD: f64 = 1.0;

/// A smoothing step ending closer than this to its target lands on it.
pub const SPRING_SNAP_DISTANCE: f64 = 0.01;

bitflags! {
    /// Boolean scroll state of a grid.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ScrollFlags: u8 {
        /// The captured pointer may move the content.
        const MOVEMENT_CAPABLE = 1 << 0;
        /// The last press landed on a cell and has not been dragged since.
        const CAN_CLICK = 1 << 1;
        /// Reach-end was signaled; more items are expected before it fires again.
        const WAITING_FOR_MORE = 1 << 2;
        /// Offsets clamp to the hard bounds instead of the out-bounds.
        const CLAMP_ENABLED = 1 << 3;
    }
}

/// Mutable scroll state owned by a grid view.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollState {
    pub(crate) offset: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) spring_velocity: Vec2,
    /// Rate of change carried between smoothing steps, in units per second.
    pub(crate) spring_rate: f64,
    pub(crate) pointer: Option<PointerId>,
    pub(crate) flags: ScrollFlags,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            velocity: Vec2::ZERO,
            spring_velocity: Vec2::ZERO,
            spring_rate: 0.0,
            pointer: None,
            flags: ScrollFlags::CLAMP_ENABLED,
        }
    }
}

impl ScrollState {
    /// Current content offset.
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Current inertia, in units per tick.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Current spring-back displacement, in units per tick.
    #[must_use]
    pub const fn spring_velocity(&self) -> Vec2 {
        self.spring_velocity
    }

    /// Captured pointer, if a drag is in progress.
    #[must_use]
    pub const fn pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    /// Boolean state flags.
    #[must_use]
    pub const fn flags(&self) -> ScrollFlags {
        self.flags
    }

    /// Returns `true` when both velocities are exactly zero.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.velocity == Vec2::ZERO && self.spring_velocity == Vec2::ZERO
    }

    pub(crate) fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.spring_velocity = Vec2::ZERO;
        self.spring_rate = 0.0;
    }
}

/// Applies one inertia step.
///
/// Slow or out-of-bounds motion stops outright; otherwise the velocity is
/// scaled by `rate ^ elapsed`.
#[must_use]
pub fn decay_inertia(velocity: Vec2, rate: f64, elapsed: f64, out_of_bounds: bool) -> Vec2 {
    if velocity.hypot() < VELOCITY_STOP_THRESHOLD || out_of_bounds {
        return Vec2::ZERO;
    }
    velocity * rate.powf(elapsed)
}

/// Where spring-back should pull `position`, if it lies outside `[low, high]`.
#[must_use]
pub fn spring_target(position: f64, low: f64, high: f64) -> Option<f64> {
    if position < low {
        Some(low)
    } else if position > high {
        Some(high)
    } else {
        None
    }
}

/// Critically damped approach of `current` toward `target`.
///
/// `rate` carries the rate of change between calls (units per second) and is
/// updated in place. `smooth_time` is roughly the time to reach the target.
/// Returns the new position; it never overshoots `target` and lands exactly on
/// it once within [`SPRING_SNAP_DISTANCE`].
pub fn smooth_damp(current: f64, target: f64, rate: &mut f64, smooth_time: f64, dt: f64) -> f64 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    // Pade-style approximation of exp(-x).
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*rate + omega * change) * dt;
    *rate = (*rate - omega * temp) * decay;
    let mut next = target + (change + temp) * decay;

    let overshot = (target - current > 0.0) == (next > target);
    if overshot || (next - target).abs() < SPRING_SNAP_DISTANCE {
        next = target;
        *rate = 0.0;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_inertia_stops() {
        let v = decay_inertia(Vec2::new(0.0, 0.5), 0.005, 0.033, false);
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn out_of_bounds_inertia_stops() {
        let v = decay_inertia(Vec2::new(0.0, 40.0), 0.005, 0.033, true);
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn inertia_decays_by_rate_per_second() {
        let v = decay_inertia(Vec2::new(0.0, -40.0), 0.5, 1.0, false);
        assert!((v.y + 20.0).abs() < 1e-9, "expected half speed, got {v:?}");

        // Two half-second steps equal one full-second step.
        let half = decay_inertia(Vec2::new(0.0, -40.0), 0.5, 0.5, false);
        let twice = decay_inertia(half, 0.5, 0.5, false);
        assert!((twice.y - v.y).abs() < 1e-9, "decay must be frame-rate independent");
    }

    #[test]
    fn spring_target_picks_violated_bound() {
        assert_eq!(spring_target(-250.0, -200.0, 0.0), Some(-200.0));
        assert_eq!(spring_target(30.0, -200.0, 0.0), Some(0.0));
        assert_eq!(spring_target(-100.0, -200.0, 0.0), None);
        assert_eq!(spring_target(-200.0, -200.0, 0.0), None);
    }

    #[test]
    fn smooth_damp_converges_without_overshoot() {
        let mut position = -300.0;
        let mut rate = 0.0;
        let mut steps = 0;
        while position != -200.0 {
            let next = smooth_damp(position, -200.0, &mut rate, 0.1, 0.033);
            assert!(next >= position, "must move toward the target");
            assert!(next <= -200.0, "must not overshoot");
            position = next;
            steps += 1;
            assert!(steps < 200, "did not converge");
        }
        assert_eq!(rate, 0.0);
    }

    #[test]
    fn smooth_damp_ignores_empty_steps() {
        let mut rate = 5.0;
        assert_eq!(smooth_damp(10.0, 0.0, &mut rate, 0.1, 0.0), 10.0);
        assert_eq!(rate, 5.0);
    }

    #[test]
    fn default_state_clamps_and_rests() {
        let state = ScrollState::default();
        assert!(state.flags().contains(ScrollFlags::CLAMP_ENABLED));
        assert!(state.is_at_rest());
        assert_eq!(state.pointer(), None);
    }
}
