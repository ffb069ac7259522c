use std::str::FromStr;
use std::time::Duration;

/// Default window served per response: a decimal megabyte (10^6), not 2^20
pub const DEFAULT_CHUNK_SIZE: u64 = 1_000_000;

/// How the `Range` header value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeMode {
    /// Strip every non-digit and read what is left as the start offset.
    /// `bytes=0-999` reads as start 999.
    #[default]
    Permissive,
    /// `bytes=<start>-[<end>]` or `bytes=-<suffix>`, anything else is rejected
    Strict,
}

impl FromStr for RangeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown range mode: {other}")),
        }
    }
}

/// Configuration for the range streamer
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Largest window served by one response
    pub chunk_size: u64,

    /// Range header interpretation
    pub range_mode: RangeMode,

    /// Fixed `Content-Type` of every response; not sniffed from the file
    pub content_type: String,

    /// Abort the body when a single read stalls for this long
    pub idle_timeout: Option<Duration>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            range_mode: RangeMode::Permissive,
            content_type: "video/mp4".to_string(),
            idle_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl StreamConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk size (at least one byte)
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = bytes.max(1);
        self
    }

    pub fn with_range_mode(mut self, mode: RangeMode) -> Self {
        self.range_mode = mode;
        self
    }

    /// Use the strict `bytes=start-end` parser
    pub fn strict(self) -> Self {
        self.with_range_mode(RangeMode::Strict)
    }

    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Never time out stalled reads
    pub fn without_idle_timeout(mut self) -> Self {
        self.idle_timeout = None;
        self
    }
}
