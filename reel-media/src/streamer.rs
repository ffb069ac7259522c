use std::sync::Arc;

use tracing::{debug, instrument};

use crate::range::{parse_range, resolve_window};
use crate::stream::{guarded, DeliveryGuard};
use crate::{ByteStream, MediaError, MediaResult, MediaSource, RangeWindow, StreamConfig};

/// A resolved partial-content response, independent of any HTTP library
pub struct RangeResponse {
    pub window: RangeWindow,
    pub content_type: String,
    pub body: ByteStream,
}

impl RangeResponse {
    pub fn content_range(&self) -> String {
        self.window.content_range()
    }

    pub fn content_length(&self) -> u64 {
        self.window.content_length()
    }
}

impl std::fmt::Debug for RangeResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeResponse")
            .field("window", &self.window)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Serves one media resource in fixed-size byte windows.
///
/// Stateless between requests: every call re-reads the resource size.
#[derive(Clone)]
pub struct RangeStreamer {
    source: Arc<dyn MediaSource>,
    config: StreamConfig,
}

impl RangeStreamer {
    pub fn new<S: MediaSource + 'static>(source: S, config: StreamConfig) -> Self {
        Self::from_arc(Arc::new(source), config)
    }

    pub fn from_arc(source: Arc<dyn MediaSource>, config: StreamConfig) -> Self {
        Self { source, config }
    }

    /// Resolve the window named by `range` and open a stream over it.
    ///
    /// A missing or blank header fails before the source is touched.
    #[instrument(skip(self), fields(source = %self.source.describe()))]
    pub async fn handle(&self, range: Option<&str>) -> MediaResult<RangeResponse> {
        let range = range
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(MediaError::MissingRange)?;
        let request = parse_range(range, self.config.range_mode)?;

        let head = self.source.head().await?;
        let window = resolve_window(request, head.size_bytes, self.config.chunk_size)?;

        let inner = self.source.open(&window).await?;
        debug!(range = %window.content_range(), "streaming window");

        let guard = DeliveryGuard::new(self.source.describe(), window);
        Ok(RangeResponse {
            window,
            content_type: self.config.content_type.clone(),
            body: guarded(inner, self.config.idle_timeout, guard),
        })
    }
}
