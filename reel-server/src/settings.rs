//! Server settings: defaults layered under `REEL__*` environment overrides.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reel_core::{ReelConfig, ReelConfigSnapshot};
use reel_media::{RangeMode, StreamConfig, DEFAULT_CHUNK_SIZE};

pub const ENV_PREFIX: &str = "REEL__";

struct Defaults;

impl Defaults {
    const HOST: &'static str = "127.0.0.1";
    const PORT: u16 = 43256;
    const MEDIA_PATH: &'static str = "Show.mp4";
    const CONTENT_TYPE: &'static str = "video/mp4";
    const RANGE_MODE: &'static str = "permissive";
    const IDLE_TIMEOUT_SECS: u64 = 30;
    const WATCH_INTERVAL_MS: u64 = 1000;
    const READ_BUFFER_BYTES: usize = 64 * 1024;
    const STATIC_DIR: &'static str = "public";
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub media_path: PathBuf,
    pub static_dir: PathBuf,
    pub stream: StreamConfig,
    pub read_buffer_bytes: usize,
    /// `None` disables the media watcher
    pub watch_interval: Option<Duration>,
}

/// Config store pre-filled with every default
pub fn default_config() -> ReelConfig {
    let mut config = ReelConfig::new();
    config.set_default("http.host", Defaults::HOST);
    config.set_default("http.port", Defaults::PORT.to_string());
    config.set_default("media.path", Defaults::MEDIA_PATH);
    config.set_default("media.content_type", Defaults::CONTENT_TYPE);
    config.set_default("media.chunk_size", DEFAULT_CHUNK_SIZE.to_string());
    config.set_default("media.range_mode", Defaults::RANGE_MODE);
    config.set_default("media.idle_timeout_secs", Defaults::IDLE_TIMEOUT_SECS.to_string());
    config.set_default("media.watch_interval_ms", Defaults::WATCH_INTERVAL_MS.to_string());
    config.set_default("media.read_buffer_bytes", Defaults::READ_BUFFER_BYTES.to_string());
    config.set_default("static.dir", Defaults::STATIC_DIR);
    config
}

/// Defaults overridden by the process environment
pub fn load() -> Result<Settings> {
    let mut config = default_config();
    config.load_env(ENV_PREFIX);
    Settings::from_snapshot(&config.snapshot())
}

fn required<T>(snap: &ReelConfigSnapshot, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = snap.get(key).ok_or_else(|| anyhow!("missing config key {key}"))?;
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("invalid value for {key}: {raw:?}"))
}

impl Settings {
    pub fn from_snapshot(snap: &ReelConfigSnapshot) -> Result<Self> {
        let chunk_size: u64 = required(snap, "media.chunk_size")?;
        if chunk_size == 0 {
            return Err(anyhow!("media.chunk_size must be at least 1"));
        }

        let idle_secs: u64 = required(snap, "media.idle_timeout_secs")?;
        let watch_ms: u64 = required(snap, "media.watch_interval_ms")?;
        let range_mode: RangeMode = required(snap, "media.range_mode")?;

        let mut stream = StreamConfig::new()
            .with_chunk_size(chunk_size)
            .with_range_mode(range_mode)
            .with_content_type(required::<String>(snap, "media.content_type")?);
        stream = match idle_secs {
            0 => stream.without_idle_timeout(),
            secs => stream.with_idle_timeout(Duration::from_secs(secs)),
        };

        Ok(Self {
            host: required(snap, "http.host")?,
            port: required(snap, "http.port")?,
            media_path: required(snap, "media.path")?,
            static_dir: required(snap, "static.dir")?,
            stream,
            read_buffer_bytes: required(snap, "media.read_buffer_bytes")?,
            watch_interval: (watch_ms > 0).then(|| Duration::from_millis(watch_ms)),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
