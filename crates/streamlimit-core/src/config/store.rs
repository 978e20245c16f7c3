//! TTL store configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Store providers understood by `StoreManager`.
pub const SUPPORTED_PROVIDERS: &[&str] = &["memory", "redis"];

/// Top-level store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider type: `"memory"` or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Redis-specific configuration.
    #[serde(default)]
    pub redis: RedisStoreConfig,
    /// In-memory store configuration.
    #[serde(default)]
    pub memory: MemoryStoreConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            redis: RedisStoreConfig::default(),
            memory: MemoryStoreConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Reject providers that no backend implements.
    pub fn validate(&self) -> Result<(), AppError> {
        if !SUPPORTED_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(AppError::configuration(format!(
                "Unknown store provider: '{}'. Supported: {}",
                self.provider,
                SUPPORTED_PROVIDERS.join(", ")
            )));
        }
        if self.memory.max_capacity == 0 {
            return Err(AppError::configuration(
                "store.memory.max_capacity must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Whether markers live only inside the process that wrote them.
    pub fn is_process_local(&self) -> bool {
        self.provider == "memory"
    }
}

/// Redis store backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Prefix prepended to every key written by this process.
    ///
    /// Empty by default so markers appear as `streamlimit:<user>:<instance>`.
    #[serde(default)]
    pub key_prefix: String,
    /// Number of keys requested per `SCAN` round trip.
    #[serde(default = "default_scan_count")]
    pub scan_count: u32,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: String::new(),
            scan_count: default_scan_count(),
        }
    }
}

/// In-memory store backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStoreConfig {
    /// Maximum number of live entries.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_scan_count() -> u32 {
    100
}

fn default_max_capacity() -> u64 {
    100_000
}
