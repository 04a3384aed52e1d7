// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid configuration and the main/cross axis helpers derived from it.

use kurbo::{Size, Vec2};
use thiserror::Error;

/// Which dimension holds a fixed number of cells per line.
///
/// The constraint also picks the scroll axis: a grid with a fixed number of
/// columns stacks rows vertically and scrolls vertically; a grid with a fixed
/// number of rows stacks columns horizontally and scrolls horizontally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum GridConstraint {
    /// Fixed column count; rows are stacked top to bottom.
    #[default]
    ColumnFixedCount,
    /// Fixed row count; columns are stacked left to right.
    RowFixedCount,
}

impl GridConstraint {
    /// Returns `true` when the main (scroll) axis is vertical.
    #[must_use]
    pub const fn scrolls_vertically(self) -> bool {
        matches!(self, Self::ColumnFixedCount)
    }

    /// Main-axis component of `v`.
    #[must_use]
    pub const fn main(self, v: Vec2) -> f64 {
        match self {
            Self::ColumnFixedCount => v.y,
            Self::RowFixedCount => v.x,
        }
    }

    /// Cross-axis component of `v`.
    #[must_use]
    pub const fn cross(self, v: Vec2) -> f64 {
        match self {
            Self::ColumnFixedCount => v.x,
            Self::RowFixedCount => v.y,
        }
    }

    /// Builds a vector from main and cross components.
    #[must_use]
    pub const fn compose(self, main: f64, cross: f64) -> Vec2 {
        match self {
            Self::ColumnFixedCount => Vec2::new(cross, main),
            Self::RowFixedCount => Vec2::new(main, cross),
        }
    }

    /// Keeps the main-axis component of `v` and zeroes the cross axis.
    #[must_use]
    pub const fn main_only(self, v: Vec2) -> Vec2 {
        self.compose(self.main(v), 0.0)
    }

    /// Replaces the main-axis component of `v`.
    #[must_use]
    pub const fn with_main(self, v: Vec2, main: f64) -> Vec2 {
        self.compose(main, self.cross(v))
    }

    /// Main-axis extent of `size`.
    #[must_use]
    pub const fn main_size(self, size: Size) -> f64 {
        self.main(Vec2::new(size.width, size.height))
    }

    /// Cross-axis extent of `size`.
    #[must_use]
    pub const fn cross_size(self, size: Size) -> f64 {
        self.cross(Vec2::new(size.width, size.height))
    }
}

/// Immutable configuration of a [`GridView`](crate::GridView).
///
/// Defaults match a two-column phone gallery: 2 cells per line, a 2 unit
/// margin, a 0.1 s spring-back and a 0.005 per-second deceleration rate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case")
)]
pub struct GridConfig {
    /// Layout direction and scroll axis.
    pub constraint: GridConstraint,
    /// Cells per line. `0` disables layout and leaves the grid inert.
    pub constraint_count: usize,
    /// Spacing between cells, in layout units.
    pub margin: f64,
    /// Spring-back smoothing time, in seconds.
    pub elasticity: f64,
    /// Fraction of scroll velocity kept after one second of inertia.
    pub scroll_deceleration_rate: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            constraint: GridConstraint::ColumnFixedCount,
            constraint_count: 2,
            margin: 2.0,
            elasticity: 0.1,
            scroll_deceleration_rate: 0.005,
        }
    }
}

impl GridConfig {
    /// Checks the numeric fields.
    ///
    /// A zero `constraint_count` is accepted: it is the explicit "layout
    /// disabled" state, not an error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ConfigError::Margin(self.margin));
        }
        if !self.elasticity.is_finite() || self.elasticity <= 0.0 {
            return Err(ConfigError::Elasticity(self.elasticity));
        }
        let rate = self.scroll_deceleration_rate;
        if !rate.is_finite() || rate <= 0.0 || rate >= 1.0 {
            return Err(ConfigError::DecelerationRate(rate));
        }
        Ok(())
    }

    /// Returns `true` if this configuration lays out no cells at all.
    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.constraint_count == 0
    }
}

/// Rejected [`GridConfig`] values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Margin was negative or not finite.
    #[error("margin must be a finite, non-negative number (got {0})")]
    Margin(f64),
    /// Elasticity was zero, negative or not finite.
    #[error("elasticity must be a finite, positive number of seconds (got {0})")]
    Elasticity(f64),
    /// Deceleration rate was outside the open interval (0, 1).
    #[error("scroll deceleration rate must lie strictly between 0 and 1 (got {0})")]
    DecelerationRate(f64),
}
