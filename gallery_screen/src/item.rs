// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery items whose image arrives after construction.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::{Bitmap, FetchError};

/// Shared handle to a [`GalleryItem`], as stored in the grid's item source.
pub type ItemHandle = Rc<GalleryItem>;

/// Where an item's image is in its lifecycle.
#[derive(Clone, Debug, Default)]
pub enum ImageState {
    /// The fetch has not resolved yet.
    #[default]
    Pending,
    /// The image is available.
    Ready(Bitmap),
    /// The fetch failed; the item stays without an image.
    Failed,
}

/// One gallery entry: a source URL and an image that may not exist yet.
#[derive(Debug)]
pub struct GalleryItem {
    url: Option<String>,
    state: RefCell<ImageState>,
}

impl GalleryItem {
    /// An item whose image is already decoded.
    #[must_use]
    pub fn from_image(image: Bitmap) -> ItemHandle {
        Rc::new(Self {
            url: None,
            state: RefCell::new(ImageState::Ready(image)),
        })
    }

    /// An item waiting for the image at `url`.
    pub fn pending(url: impl Into<String>) -> ItemHandle {
        Rc::new(Self {
            url: Some(url.into()),
            state: RefCell::new(ImageState::Pending),
        })
    }

    /// Source URL, for items created by [`pending`](Self::pending).
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The image, once it has arrived.
    #[must_use]
    pub fn image(&self) -> Option<Bitmap> {
        match &*self.state.borrow() {
            ImageState::Ready(image) => Some(Arc::clone(image)),
            ImageState::Pending | ImageState::Failed => None,
        }
    }

    /// A snapshot of the lifecycle state.
    #[must_use]
    pub fn state(&self) -> ImageState {
        self.state.borrow().clone()
    }

    /// Returns `true` until the fetch has resolved either way.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(*self.state.borrow(), ImageState::Pending)
    }

    /// Stores the fetch outcome. Only the first resolution counts.
    pub(crate) fn resolve(&self, result: Result<Bitmap, FetchError>) {
        let mut state = self.state.borrow_mut();
        if matches!(*state, ImageState::Pending) {
            *state = match result {
                Ok(image) => ImageState::Ready(image),
                Err(_) => ImageState::Failed,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use image::DynamicImage;

    use super::*;

    fn bitmap() -> Bitmap {
        Arc::new(DynamicImage::new_rgba8(2, 2))
    }

    #[test]
    fn pending_item_gains_image_on_success() {
        let item = GalleryItem::pending("http://host/1.jpg");
        assert!(item.is_pending());
        assert!(item.image().is_none());
        item.resolve(Ok(bitmap()));
        assert!(matches!(item.state(), ImageState::Ready(_)));
        assert_eq!(item.image().map(|image| image.width()), Some(2));
    }

    #[test]
    fn failed_fetch_leaves_image_absent() {
        let item = GalleryItem::pending("http://host/1.jpg");
        item.resolve(Err(FetchError::Status(404)));
        assert!(matches!(item.state(), ImageState::Failed));
        assert!(item.image().is_none());
        // A late success does not overwrite the outcome.
        item.resolve(Ok(bitmap()));
        assert!(item.image().is_none());
    }

    #[test]
    fn ready_item_has_no_url() {
        let item = GalleryItem::from_image(bitmap());
        assert_eq!(item.url(), None);
        assert!(!item.is_pending());
    }
}
