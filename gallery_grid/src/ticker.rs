// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-cadence, pausable animation clock.

use core::time::Duration;

/// Cadence of the post-release animation (about 30 Hz).
pub const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// Most ticks replayed by one [`AnimationTicker::advance`] call.
///
/// A host that stalls for seconds resumes the animation instead of
/// replaying every missed tick.
pub const MAX_CATCH_UP_TICKS: u32 = 4;

/// A pausable clock that turns elapsed time into whole ticks.
///
/// Starting a running ticker and pausing a paused one are both no-ops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationTicker {
    period: Duration,
    running: bool,
    accumulated: Duration,
}

impl Default for AnimationTicker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl AnimationTicker {
    /// Creates a paused ticker with the given period.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            running: false,
            accumulated: Duration::ZERO,
        }
    }

    /// Tick period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` while the ticker is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Starts or resumes the ticker.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.accumulated = Duration::ZERO;
        }
    }

    /// Pauses the ticker.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Adds `elapsed` and returns how many ticks are due.
    ///
    /// A paused ticker never has ticks due. A zero period yields one tick per call.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        if self.period.is_zero() {
            return 1;
        }
        self.accumulated += elapsed;
        let due = self.accumulated.as_nanos() / self.period.as_nanos();
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        if due > MAX_CATCH_UP_TICKS {
            self.accumulated = Duration::ZERO;
            return MAX_CATCH_UP_TICKS;
        }
        self.accumulated -= self.period * due;
        due
    }
}
