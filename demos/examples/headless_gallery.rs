// Copyright 2025 the Gallery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless gallery session: real downloads, simulated touch input.
//!
//! This example drives a `GalleryScreen` the way a host engine would:
//! - a tokio runtime runs the image downloads,
//! - the main loop ticks at the grid's cadence, applying finished fetches,
//! - a few scripted flings scroll to the end and trigger more pages,
//! - a tap opens the preview, and back navigation closes it and asks for the menu.
//!
//! Without network access every fetch fails; the failures are logged and the
//! session continues with empty cells.
//!
//! Run:
//! - `cargo run -p gallery_demos --example headless_gallery`
//! - `cargo run -p gallery_demos --example headless_gallery -- demos/gallery.toml`
//! - `RUST_LOG=gallery_grid=trace cargo run -p gallery_demos --example headless_gallery`

use std::error::Error;
use std::num::NonZeroU64;
use std::time::Duration;

use gallery_grid::{PointerEvent, TICK_INTERVAL};
use gallery_screen::{
    BackAction, GalleryConfig, GalleryScreen, HttpImageFetcher, ImageFetcher, SceneHost, SceneLoader,
    SceneRef,
};
use kurbo::{Point, Size, Vec2};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logs scene switches instead of performing them.
struct LoggingHost;

impl SceneHost for LoggingHost {
    fn load_scene_async(&mut self, scene: &SceneRef) {
        info!(scene = scene.name(), "host switching scene");
    }
}

fn run_frames<F: ImageFetcher>(screen: &mut GalleryScreen<F>, frames: u32) {
    for _ in 0..frames {
        std::thread::sleep(TICK_INTERVAL);
        screen.poll_fetches();
        screen.update(TICK_INTERVAL);
    }
}

fn fling<F: ImageFetcher>(screen: &mut GalleryScreen<F>, id: u64, dy: f64) {
    let Some(id) = NonZeroU64::new(id) else {
        return;
    };
    let mut at = Point::new(180.0, 600.0);
    screen.handle_pointer(PointerEvent::down(id, at));
    let step = Vec2::new(0.0, dy / 10.0);
    for _ in 0..10 {
        at += step;
        screen.handle_pointer(PointerEvent::moved(id, at, step));
    }
    screen.handle_pointer(PointerEvent::up(id, at, step));
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gallery_screen=debug,gallery_grid=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GalleryConfig::load(path)?,
        None => GalleryConfig::default(),
    };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let fetcher = HttpImageFetcher::new(runtime.handle().clone())?;
    let mut loader = SceneLoader::new(config.loading_time_secs);
    let mut screen = GalleryScreen::new(config, fetcher)?;
    screen.on_layout(Size::new(360.0, 640.0));
    info!(requested = screen.items().len(), "first page requested");

    for (gesture, dy) in [-900.0, -1200.0, 300.0].into_iter().enumerate() {
        run_frames(&mut screen, 30);
        fling(&mut screen, gesture as u64 + 1, dy);
        info!(
            offset = ?screen.grid().scroll_offset(),
            items = screen.items().len(),
            pending = screen.pending_fetches(),
            "fling done"
        );
    }
    run_frames(&mut screen, 60);

    // Tap the first visible cell.
    let tap = Point::new(90.0, 90.0);
    if let Some(id) = NonZeroU64::new(99) {
        screen.handle_pointer(PointerEvent::down(id, tap));
        screen.handle_pointer(PointerEvent::up(id, tap, Vec2::ZERO));
    }
    if screen.handle_click(tap) {
        let preview = screen.preview();
        info!(
            orientation = ?preview.orientation(),
            has_image = preview.image().is_some(),
            "preview open"
        );
    }

    let ready = screen
        .items()
        .iter()
        .filter(|item| item.image().is_some())
        .count();
    info!(ready, total = screen.items().len(), "session summary");

    let mut host = LoggingHost;
    loop {
        match screen.on_back() {
            BackAction::ClosedPreview => info!("preview closed"),
            BackAction::LoadScene(scene) => {
                loader.load(&mut host, &scene);
                break;
            }
        }
    }
    while let Some(progress) = loader.update(0.5) {
        info!(progress, "loading");
    }

    runtime.shutdown_timeout(Duration::from_secs(1));
    Ok(())
}
