// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery Screen: a paged thumbnail gallery built on [`gallery_grid`].
//!
//! The crate wires a [`GridView`](gallery_grid::GridView) to remote images:
//!
//! - [`GalleryScreen`] requests one screenful of images per page as
//!   `{base_url}/{index}.jpg`, and requests the next page each time the grid
//!   reaches its end, until the configured maximum is requested.
//! - [`ImageFetcher`] is the fetch seam. [`HttpImageFetcher`] downloads with
//!   `reqwest` and decodes with `image` on a tokio runtime; tests substitute
//!   their own.
//! - [`GalleryItem`]s start out pending and receive their image in place.
//!   A failed fetch is logged and leaves the item without an image.
//! - [`PreviewOverlay`] shows a tapped item full screen; back navigation
//!   closes it, or returns to the menu scene through [`BackAction`].
//! - [`SceneLoader`], [`LoadingProgress`] and [`MenuScreen`] cover scene
//!   switching behind a timed loading bar.
//!
//! The screen is single-threaded (items are `Rc` handles). Only the downloads
//! run elsewhere; their results are applied by [`GalleryScreen::poll_fetches`]
//! once per frame, or awaited with [`GalleryScreen::resolve_next`].
//!
//! Settings come from [`GalleryConfig`], usually read from TOML with
//! [`GalleryConfig::load`].

mod cell;
mod config;
mod fetch;
mod item;
mod preview;
mod scene;
mod screen;

pub use cell::{ThumbnailCell, ThumbnailCells};
pub use config::{ConfigError, GalleryConfig};
pub use fetch::{Bitmap, FetchError, HttpImageFetcher, ImageFetcher, image_url};
pub use item::{GalleryItem, ImageState, ItemHandle};
pub use preview::{PreviewOverlay, ScreenOrientation};
pub use scene::{LoadingProgress, MenuScreen, SceneHost, SceneLoader, SceneRef};
pub use screen::{BackAction, GalleryScreen};
