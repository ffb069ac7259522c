//! Library template created with FerrisUp

//! reel-axum: Axum adapter for reel.
//!
//! Routes `GET /video.mp4` to a [`reel_media::RangeStreamer`], serves the
//! player page at `/`, and falls back to a static directory.

pub mod app;
mod error;
pub mod page;
pub mod state;
pub mod video;
pub use error::{media_error, ReelAxumError};
pub use state::ReelAxumState;

pub use app::{reel, ReelApp};
