use std::sync::Arc;

use reel_media::RangeStreamer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct ReelAxumState {
    pub streamer: Arc<RangeStreamer>,
}

impl ReelAxumState {
    pub fn new(streamer: RangeStreamer) -> Self {
        Self {
            streamer: Arc::new(streamer),
        }
    }
}
