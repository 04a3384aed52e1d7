// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery settings, loaded from TOML.

use std::path::Path;

use gallery_grid::GridConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::SceneRef;

/// Where the thumbnails come from, how many there are, and how the grid behaves.
///
/// Every field has a default, so an empty file is a valid configuration:
///
/// ```toml
/// base-url = "http://data.ikppbb.com/test-task-unity-data/pics"
/// max-image-count = 66
/// loading-time-secs = 2.0
/// menu-scene = "Menu"
/// gallery-scene = "Gallery"
///
/// [grid]
/// constraint = "column-fixed-count"
/// constraint-count = 2
/// margin = 2.0
/// elasticity = 0.1
/// scroll-deceleration-rate = 0.005
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GalleryConfig {
    /// Image `i` (1-based) is fetched from `{base_url}/{i}.jpg`.
    pub base_url: String,
    /// Highest image index to fetch.
    pub max_image_count: usize,
    /// How long the loading overlay shows on a scene switch, in seconds.
    pub loading_time_secs: f64,
    /// Scene opened by back navigation.
    pub menu_scene: SceneRef,
    /// Scene that hosts the gallery.
    pub gallery_scene: SceneRef,
    /// Grid layout and physics.
    pub grid: GridConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://data.ikppbb.com/test-task-unity-data/pics".to_owned(),
            max_image_count: 66,
            loading_time_secs: 2.0,
            menu_scene: SceneRef::new("Menu"),
            gallery_scene: SceneRef::new("Gallery"),
            grid: GridConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the TOML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks the grid section and the loading time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if !self.loading_time_secs.is_finite() || self.loading_time_secs < 0.0 {
            return Err(ConfigError::LoadingTime(self.loading_time_secs));
        }
        Ok(())
    }
}

/// Errors produced while loading a [`GalleryConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for this schema.
    #[error("TOML error: {0}")]
    Parse(#[from] toml::de::Error),
    /// The `[grid]` section is out of range.
    #[error("invalid grid configuration: {0}")]
    Invalid(#[from] gallery_grid::ConfigError),
    /// The loading time is negative or not finite.
    #[error("loading time must be a finite, non-negative number of seconds (got {0})")]
    LoadingTime(f64),
}

#[cfg(test)]
mod tests {
    use gallery_grid::GridConstraint;

    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = GalleryConfig::from_toml_str("").unwrap();
        assert_eq!(config, GalleryConfig::default());
        assert_eq!(config.max_image_count, 66);
        assert_eq!(config.menu_scene.name(), "Menu");
    }

    #[test]
    fn parses_grid_table() {
        let config = GalleryConfig::from_toml_str(
            r#"
            base-url = "http://localhost:8080/pics"
            max-image-count = 12

            [grid]
            constraint = "row-fixed-count"
            constraint-count = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/pics");
        assert_eq!(config.max_image_count, 12);
        assert_eq!(config.grid.constraint, GridConstraint::RowFixedCount);
        assert_eq!(config.grid.constraint_count, 3);
        assert_eq!(config.grid.elasticity, 0.1);
    }

    #[test]
    fn rejects_invalid_grid() {
        let err = GalleryConfig::from_toml_str("[grid]\nelasticity = -1.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(gallery_grid::ConfigError::Elasticity(_))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = GalleryConfig::from_toml_str("max-image-count = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GalleryConfig::load("/definitely/not/here/gallery.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
