//! Library template created with FerrisUp

//! # reel-media: byte-range media streaming
//!
//! `reel-media` serves a single media resource in fixed-size partial-content
//! windows, the mechanism browsers use for video seeking. It is transport
//! agnostic: the HTTP crate turns a [`RangeResponse`] into a `206`.
//!
//! ```rust
//! use reel_media::{MemoryMediaSource, RangeStreamer, StreamConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> reel_media::MediaResult<()> {
//! let source = MemoryMediaSource::new("clip", vec![0u8; 2_500_000]);
//! let streamer = RangeStreamer::new(source, StreamConfig::default());
//!
//! let response = streamer.handle(Some("bytes=1000000-")).await?;
//! assert_eq!(response.content_range(), "bytes 1000000-1999999/2500000");
//! # Ok(())
//! # }
//! ```
//!
//! ```text
//! ┌─────────────────┐
//! │  HTTP handler   │  ← status codes and headers
//! ├─────────────────┤
//! │  RangeStreamer  │  ← parse, window, guard
//! ├─────────────────┤
//! │  MediaSource    │  ← size + bytes
//! └─────────────────┘
//! ```

mod config;
mod error;
pub mod range;
pub mod source;
pub mod stream;
mod streamer;
mod types;
pub mod watch;

pub use config::{RangeMode, StreamConfig, DEFAULT_CHUNK_SIZE};
pub use error::{MediaError, MediaResult};
pub use range::{parse_range, resolve_window};
pub use source::{FsMediaSource, MediaSource, MemoryMediaSource};
pub use streamer::{RangeResponse, RangeStreamer};
pub use types::{unsatisfied_content_range, ByteStream, MediaHead, MediaRevision, RangeRequest, RangeWindow};
pub use watch::MediaWatcher;
