//! # Configuration
//!
//! A minimal configuration system based on a string key/value store.
//! Keys are dotted (`media.chunk_size`) and can be layered from defaults,
//! then overridden from the environment:
//!
//! ```rust
//! use reel_core::ReelConfig;
//!
//! let mut config = ReelConfig::new();
//! config.set("media.chunk_size", "1000000");
//!
//! let snapshot = config.snapshot();
//! assert_eq!(snapshot.get_u64("media.chunk_size"), Some(1_000_000));
//! ```
//!
//! `load_env("REEL__")` maps `REEL__MEDIA__CHUNK_SIZE=500` to
//! `media.chunk_size = "500"`.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ReelConfig {
    values: HashMap<String, String>,
}

impl ReelConfig {
    /// Create an empty config store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a configuration key to a string value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Set a key only if nothing has been set for it yet.
    pub fn set_default<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Get a configuration value by key.
    ///
    /// Returns None if the key is not present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Override keys from environment variables starting with `prefix`.
    pub fn load_env(&mut self, prefix: &str) {
        self.load_vars(prefix, std::env::vars());
    }

    /// Same as [`ReelConfig::load_env`] over an explicit set of variables.
    pub fn load_vars<I>(&mut self, prefix: &str, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(prefix) {
                let normalized = stripped.to_lowercase().replace("__", "."); // REEL__MEDIA__PATH → media.path
                self.set(normalized, value);
            }
        }
    }

    pub fn snapshot(&self) -> ReelConfigSnapshot {
        ReelConfigSnapshot::new(self.values.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReelConfigSnapshot {
    map: HashMap<String, String>,
}

impl ReelConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.trim().parse::<u64>().ok())
    }

    pub fn get_u16(&self, key: &str) -> Option<u16> {
        self.get(key).and_then(|v| v.trim().parse::<u16>().ok())
    }
}
