//! TTL key-value store trait for pluggable marker backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for key-value stores with per-key expiration (Redis, in-memory).
///
/// Values are plain strings. Implementations must make [`set_nx`]
/// atomic across concurrent callers; every other operation only needs
/// to observe keys that have not yet expired.
///
/// [`set_nx`]: TtlStore::set_nx
#[async_trait]
pub trait TtlStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return every live key matching a glob pattern (e.g. `"streamlimit:42:*"`).
    ///
    /// Iteration order is not significant. Portable patterns stick to `*`
    /// and `?`; class negation syntax differs between backends.
    async fn iter_keys(&self, pattern: &str) -> AppResult<Vec<String>>;

    /// Create the key only if it does not already exist (NX).
    ///
    /// Returns `true` if this call created the key. A key created this
    /// way has no expiry until [`TtlStore::expire`] is called.
    async fn set_nx(&self, key: &str, value: &str) -> AppResult<bool>;

    /// Replace the remaining TTL of a key. A zero TTL removes the key.
    ///
    /// Returns `false` if the key did not exist; that is not an error.
    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool>;

    /// Get the value of a live key. Returns `None` if absent or expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Check that the store backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
