// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Remote image fetching.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use image::DynamicImage;
use thiserror::Error;
use tokio::runtime::Handle;

/// A decoded image, shared between the item, the grid cell and the preview.
pub type Bitmap = Arc<DynamicImage>;

/// Why an image could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("HTTP protocol error: status {0}")]
    Status(u16),
    /// The body was not a decodable image.
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    /// The download task panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Source of thumbnail bitmaps.
///
/// Implementations must not panic: every failure is reported as an `Err`.
/// The returned future is `Send` so it can run on any executor; the caller
/// keeps it until it resolves.
pub trait ImageFetcher {
    /// Starts fetching the image at `url`.
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<Bitmap, FetchError>>;
}

/// URL of the 1-based image `index` under `base_url`.
#[must_use]
pub fn image_url(base_url: &str, index: usize) -> String {
    format!("{}/{index}.jpg", base_url.trim_end_matches('/'))
}

/// Fetches images over HTTP and decodes them on a tokio runtime.
#[derive(Clone, Debug)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
    runtime: Handle,
}

impl HttpImageFetcher {
    /// Default per-request timeout.
    pub const TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a fetcher that spawns its downloads on `runtime`.
    pub fn new(runtime: Handle) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(Self::TIMEOUT).build()?;
        Ok(Self::with_client(client, runtime))
    }

    /// Creates a fetcher from a preconfigured client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, runtime: Handle) -> Self {
        Self { client, runtime }
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<Bitmap, FetchError>> {
        let client = self.client.clone();
        let url = url.to_owned();
        let task = self.runtime.spawn(async move { download(&client, &url).await });
        async move {
            match task.await {
                Ok(result) => result,
                Err(err) => Err(FetchError::Join(err)),
            }
        }
        .boxed()
    }
}

async fn download(client: &reqwest::Client, url: &str) -> Result<Bitmap, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    let bytes = response.bytes().await?;
    let image = image::load_from_memory(&bytes)?;
    Ok(Arc::new(image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_one_based_jpgs() {
        assert_eq!(image_url("http://host/pics", 1), "http://host/pics/1.jpg");
        assert_eq!(image_url("http://host/pics/", 66), "http://host/pics/66.jpg");
    }

    #[test]
    fn status_error_names_the_code() {
        let err = FetchError::Status(404);
        assert_eq!(err.to_string(), "HTTP protocol error: status 404");
    }
}
