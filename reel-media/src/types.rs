use bytes::Bytes;
use futures_core::Stream;
use std::pin::Pin;

/// Stream of bytes for media content
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// A byte range as requested by the client, before it meets the resource size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRequest {
    /// `bytes=<start>-[<end>]`
    FromStart { start: u64, end: Option<u64> },
    /// `bytes=-<length>`: the last `length` bytes
    Suffix { length: u64 },
}

impl RangeRequest {
    pub fn from_start(start: u64) -> Self {
        Self::FromStart { start, end: None }
    }

    pub fn bounded(start: u64, end: u64) -> Self {
        Self::FromStart {
            start,
            end: Some(end),
        }
    }
}

/// Inclusive byte window resolved against the current resource size.
///
/// Always satisfies `start <= end < total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeWindow {
    pub start: u64,
    pub end: u64,
    pub total: u64,
}

impl RangeWindow {
    pub fn content_length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` header value, e.g. `bytes 0-999999/2500000`
    pub fn content_range(&self) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, self.total)
    }

    pub fn is_full_content(&self) -> bool {
        self.start == 0 && self.end + 1 == self.total
    }
}

/// `Content-Range` value for a 416 response
pub fn unsatisfied_content_range(total: u64) -> String {
    format!("bytes */{}", total)
}

/// Metadata about the media resource, read fresh per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHead {
    pub size_bytes: u64,
    /// Modification time in milliseconds since the Unix epoch, when known
    pub last_modified: Option<i64>,
}

/// Revision of the media resource as observed by the watcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaRevision {
    pub revision: u64,
    pub last_modified: Option<i64>,
}
