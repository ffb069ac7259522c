//! Library template created with FerrisUp

//! reel-core: errors and configuration shared by the reel crates.

pub mod config;
pub mod errors;

pub use config::{ReelConfig, ReelConfigSnapshot};
pub use errors::{ErrorKind, ReelError, ReelResult};
