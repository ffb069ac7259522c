//! reel-server: wires settings, the media source and the HTTP app together.

pub mod settings;

use std::sync::Arc;

use reel_axum::{reel, ReelApp};
use reel_media::{FsMediaSource, MediaSource, MediaWatcher, RangeStreamer};

pub use settings::Settings;

pub struct Server {
    pub app: ReelApp,
    pub watcher: Option<MediaWatcher>,
}

/// Build the HTTP app and, when enabled, the media watcher for `settings`
pub fn build(settings: &Settings) -> Server {
    let source: Arc<dyn MediaSource> = Arc::new(
        FsMediaSource::new(settings.media_path.clone()).with_read_buffer(settings.read_buffer_bytes),
    );

    let streamer = RangeStreamer::from_arc(Arc::clone(&source), settings.stream.clone());
    let app = reel(streamer)
        .use_get("/health", || async { "ok" })
        .serve_dir(&settings.static_dir);

    let watcher = settings
        .watch_interval
        .map(|interval| MediaWatcher::with_interval(source, interval));

    Server { app, watcher }
}
