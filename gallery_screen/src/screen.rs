// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gallery screen: paging, fetch resolution, selection and back navigation.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use gallery_grid::{GridEvent, GridView, PointerEvent};
use kurbo::{Point, Size};
use tracing::{debug, warn};

use crate::{
    Bitmap, ConfigError, FetchError, GalleryConfig, GalleryItem, ImageFetcher, ItemHandle,
    PreviewOverlay, SceneRef, ThumbnailCells, image_url,
};

type PendingFetch = BoxFuture<'static, (usize, Result<Bitmap, FetchError>)>;

/// What back navigation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackAction {
    /// The preview was open and has been closed.
    ClosedPreview,
    /// Nothing to close; the host should load this scene.
    LoadScene(SceneRef),
}

/// A paged gallery of remote thumbnails.
///
/// Pages are sized to fill the viewport. The first page loads on the first
/// layout, and later pages load whenever the grid reaches its end, until
/// [`GalleryConfig::max_image_count`] images have been requested.
pub struct GalleryScreen<F> {
    config: GalleryConfig,
    fetcher: F,
    items: Vec<ItemHandle>,
    grid: GridView<ItemHandle, ThumbnailCells>,
    pending: FuturesUnordered<PendingFetch>,
    preview: PreviewOverlay,
    started: bool,
}

impl<F> fmt::Debug for GalleryScreen<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryScreen")
            .field("config", &self.config)
            .field("items", &self.items.len())
            .field("pending", &self.pending.len())
            .field("grid", &self.grid)
            .field("preview", &self.preview)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl<F: ImageFetcher> GalleryScreen<F> {
    /// Creates an empty screen. Nothing is fetched until [`on_layout`](Self::on_layout).
    pub fn new(config: GalleryConfig, fetcher: F) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut grid = GridView::new(config.grid, ThumbnailCells)?;
        grid.set_wait_for_more(true);
        grid.set_item_source(Some(Rc::from(Vec::new())));
        Ok(Self {
            config,
            fetcher,
            items: Vec::new(),
            grid,
            pending: FuturesUnordered::new(),
            preview: PreviewOverlay::default(),
            started: false,
        })
    }

    /// The screen configuration.
    #[must_use]
    pub const fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// The thumbnail grid.
    #[must_use]
    pub const fn grid(&self) -> &GridView<ItemHandle, ThumbnailCells> {
        &self.grid
    }

    /// All items requested so far, in display order.
    #[must_use]
    pub fn items(&self) -> &[ItemHandle] {
        &self.items
    }

    /// The preview overlay.
    #[must_use]
    pub const fn preview(&self) -> &PreviewOverlay {
        &self.preview
    }

    /// Number of fetches that have not resolved yet.
    #[must_use]
    pub fn pending_fetches(&self) -> usize {
        self.pending.len()
    }

    /// Applies a new viewport size.
    ///
    /// The first layout that fits at least one cell loads the first page;
    /// empty viewports before that load nothing.
    pub fn on_layout(&mut self, viewport: Size) {
        self.grid.on_viewport_resized(viewport);
        if !self.started {
            self.started = self.load_next_page() > 0;
        }
    }

    /// Requests the next screenful of images. Returns how many were requested.
    ///
    /// Reaching [`GalleryConfig::max_image_count`] turns the grid's trailing
    /// edge back into a hard stop.
    pub fn load_next_page(&mut self) -> usize {
        let len = self.items.len();
        let max = self.config.max_image_count;
        let end = len.saturating_add(self.grid.visible_item_count()).min(max);
        if end == max {
            self.grid.set_wait_for_more(false);
        }
        if end <= len {
            return 0;
        }
        debug!(start = len + 1, end, "loading gallery page");
        for index in len + 1..=end {
            let url = image_url(&self.config.base_url, index);
            let slot = self.items.len();
            let fetch = self.fetcher.fetch(&url);
            self.items.push(GalleryItem::pending(url));
            self.pending
                .push(fetch.map(move |result| (slot, result)).boxed());
        }
        self.publish_items();
        end - len
    }

    /// Applies every fetch that has already finished, without waiting.
    ///
    /// Call once per frame. Returns how many fetches were applied.
    pub fn poll_fetches(&mut self) -> usize {
        let mut resolved = 0;
        while let Some(Some((slot, result))) = self.pending.next().now_or_never() {
            self.resolve(slot, result);
            resolved += 1;
        }
        if resolved > 0 {
            self.publish_items();
        }
        resolved
    }

    /// Waits for the next fetch and applies it.
    ///
    /// Returns `false` when nothing is in flight.
    pub async fn resolve_next(&mut self) -> bool {
        let Some((slot, result)) = self.pending.next().await else {
            return false;
        };
        self.resolve(slot, result);
        self.publish_items();
        true
    }

    fn resolve(&self, slot: usize, result: Result<Bitmap, FetchError>) {
        let Some(item) = self.items.get(slot) else {
            return;
        };
        if let Err(err) = &result {
            warn!(url = item.url().unwrap_or_default(), %err, "image fetch failed");
        }
        item.resolve(result);
    }

    /// Rebinds every cell against the current items.
    fn publish_items(&mut self) {
        self.grid.set_item_source(Some(Rc::from(self.items.clone())));
    }

    /// Advances the grid animation and reacts to what it reports.
    pub fn update(&mut self, elapsed: Duration) {
        self.grid.update(elapsed);
        self.handle_grid_events();
    }

    /// Forwards a pointer event to the grid unless the preview covers it.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if self.preview.is_visible() {
            return false;
        }
        let handled = self.grid.handle_pointer(event);
        self.handle_grid_events();
        handled
    }

    /// Forwards a click to the grid unless the preview covers it.
    pub fn handle_click(&mut self, position: Point) -> bool {
        if self.preview.is_visible() {
            return false;
        }
        let handled = self.grid.handle_click(position);
        self.handle_grid_events();
        handled
    }

    fn handle_grid_events(&mut self) {
        for event in self.grid.drain_events() {
            match event {
                GridEvent::ReachedEnd => {
                    if self.items.len() < self.config.max_image_count {
                        self.load_next_page();
                    }
                }
                GridEvent::Selected { index, item } => {
                    debug!(index, "previewing gallery item");
                    self.preview.show(item);
                }
            }
        }
    }

    /// Closes the preview (the overlay's close button).
    pub fn close_preview(&mut self) -> bool {
        self.preview.close()
    }

    /// Back navigation: closes the preview if open, otherwise asks for the menu scene.
    pub fn on_back(&mut self) -> BackAction {
        if self.preview.close() {
            BackAction::ClosedPreview
        } else {
            BackAction::LoadScene(self.config.menu_scene.clone())
        }
    }
}
