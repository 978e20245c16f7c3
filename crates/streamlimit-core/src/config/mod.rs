//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default so an empty file (or no
//! file at all) yields a usable configuration.

pub mod logging;
pub mod store;
pub mod tracker;

use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::store::{MemoryStoreConfig, RedisStoreConfig, StoreConfig};
pub use self::tracker::TrackerConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "STREAMLIMIT";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// TTL store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Stream tracker settings.
    #[serde(default)]
    pub tracker: TrackerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional. Environment variables prefixed with
    /// `STREAMLIMIT__` override file values, e.g.
    /// `STREAMLIMIT__STORE__PROVIDER=redis`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        app.validate()?;
        Ok(app)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        self.store.validate()?;
        self.tracker.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.provider, "memory");
        assert_eq!(config.tracker.default_ttl_seconds, 70);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_deserializes() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str("", config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.tracker.default_ttl_seconds, 70);
        assert_eq!(config.store.redis.url, "redis://localhost:6379");
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            [store]
            provider = "redis"

            [store.redis]
            key_prefix = "prod:"

            [tracker]
            default_ttl_seconds = 90
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.store.provider, "redis");
        assert_eq!(config.store.redis.key_prefix, "prod:");
        assert_eq!(config.tracker.default_ttl_seconds, 90);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let mut config = AppConfig::default();
        config.store.provider = "memcached".to_string();
        assert!(config.validate().is_err());
    }
}
