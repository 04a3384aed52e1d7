// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene switching with a timed loading overlay, and the menu that starts the gallery.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of a scene the host knows how to load.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneRef(String);

impl SceneRef {
    /// Creates a reference to the scene called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The scene name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// The engine side of scene switching.
pub trait SceneHost {
    /// Starts replacing the current scene with `scene`.
    ///
    /// Completion is not reported back.
    fn load_scene_async(&mut self, scene: &SceneRef);
}

/// Progress bar shown for a fixed time while a scene loads.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadingProgress {
    duration: f64,
    elapsed: f64,
    active: bool,
}

impl LoadingProgress {
    /// Starts an active progress run lasting `duration` seconds.
    #[must_use]
    pub fn start(duration: f64) -> Self {
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
        Self {
            duration,
            elapsed: 0.0,
            active: true,
        }
    }

    /// Adds `dt` seconds and returns the progress percentage.
    ///
    /// The run deactivates once the elapsed time reaches the duration.
    /// Returns `None` when already inactive.
    pub fn advance(&mut self, dt: f64) -> Option<f64> {
        if !self.active {
            return None;
        }
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        if self.elapsed >= self.duration {
            self.active = false;
            return Some(100.0);
        }
        Some(100.0 * self.elapsed / self.duration)
    }

    /// Current percentage, in `0..=100`.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.duration <= 0.0 {
            return 100.0;
        }
        (100.0 * self.elapsed / self.duration).min(100.0)
    }

    /// Whether the overlay is still showing.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Loads scenes behind a [`LoadingProgress`] overlay.
#[derive(Clone, Debug)]
pub struct SceneLoader {
    loading_time: f64,
    progress: Option<LoadingProgress>,
}

impl SceneLoader {
    /// Creates a loader whose overlay lasts `loading_time` seconds.
    #[must_use]
    pub const fn new(loading_time: f64) -> Self {
        Self {
            loading_time,
            progress: None,
        }
    }

    /// Shows the loading overlay and asks `host` to switch to `scene`.
    pub fn load(&mut self, host: &mut impl SceneHost, scene: &SceneRef) {
        debug!(scene = scene.name(), "loading scene");
        self.progress = Some(LoadingProgress::start(self.loading_time));
        host.load_scene_async(scene);
    }

    /// Advances the overlay; returns the percentage while it is showing.
    pub fn update(&mut self, dt: f64) -> Option<f64> {
        let progress = self.progress.as_mut()?;
        let value = progress.advance(dt);
        if !progress.is_active() {
            self.progress = None;
        }
        value
    }

    /// The running overlay, if any.
    #[must_use]
    pub const fn progress(&self) -> Option<&LoadingProgress> {
        self.progress.as_ref()
    }
}

/// The start menu: one button that opens the gallery.
#[derive(Clone, Debug)]
pub struct MenuScreen {
    gallery_scene: SceneRef,
}

impl MenuScreen {
    /// Name of the button that opens the gallery.
    pub const GALLERY_BUTTON: &'static str = "Gallery";

    /// Creates a menu that opens `gallery_scene`.
    #[must_use]
    pub const fn new(gallery_scene: SceneRef) -> Self {
        Self { gallery_scene }
    }

    /// Handles a click on the button called `button`.
    ///
    /// Returns `true` if the click started a scene load.
    pub fn on_click(
        &self,
        button: &str,
        loader: &mut SceneLoader,
        host: &mut impl SceneHost,
    ) -> bool {
        if button != Self::GALLERY_BUTTON {
            return false;
        }
        loader.load(host, &self.gallery_scene);
        true
    }
}
