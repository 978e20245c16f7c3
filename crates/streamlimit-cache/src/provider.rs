//! Store manager that dispatches to the configured backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use streamlimit_core::config::store::StoreConfig;
use streamlimit_core::error::AppError;
use streamlimit_core::result::AppResult;
use streamlimit_core::traits::store::TtlStore;

/// Store manager that wraps the configured TTL store.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner store.
    inner: Arc<dyn TtlStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn TtlStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis TTL store");
                let store = crate::redis::RedisTtlStore::connect(&config.redis).await?;
                Arc::new(store)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!(
                    max_capacity = config.memory.max_capacity,
                    "Initializing in-memory TTL store"
                );
                Arc::new(crate::memory::MemoryTtlStore::new(&config.memory))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown or disabled store provider: '{other}'"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store manager from an existing store (for testing).
    pub fn from_store(store: Arc<dyn TtlStore>) -> Self {
        Self { inner: store }
    }

    /// Get a shared handle to the inner store.
    pub fn store(&self) -> Arc<dyn TtlStore> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl TtlStore for StoreManager {
    async fn iter_keys(&self, pattern: &str) -> AppResult<Vec<String>> {
        self.inner.iter_keys(pattern).await
    }

    async fn set_nx(&self, key: &str, value: &str) -> AppResult<bool> {
        self.inner.set_nx(key, value).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        self.inner.expire(key, ttl).await
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_provider_from_config() {
        let manager = StoreManager::new(&StoreConfig::default()).await.unwrap();
        assert!(manager.set_nx("k", "v").await.unwrap());
        assert_eq!(manager.get("k").await.unwrap(), Some("v".to_string()));
        assert!(manager.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_provider_is_rejected() {
        let config = StoreConfig {
            provider: "memcached".to_string(),
            ..StoreConfig::default()
        };
        let err = StoreManager::new(&config).await.unwrap_err();
        assert_eq!(
            err.kind,
            streamlimit_core::error::ErrorKind::Configuration
        );
    }
}
