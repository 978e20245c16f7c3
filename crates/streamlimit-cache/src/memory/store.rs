//! In-memory TTL store backed by a concurrent hash map.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use glob::Pattern;
use tokio::time::Instant;
use tracing::debug;

use streamlimit_core::config::store::MemoryStoreConfig;
use streamlimit_core::error::{AppError, ErrorKind};
use streamlimit_core::result::AppResult;
use streamlimit_core::traits::store::TtlStore;

/// A stored value and its deadline.
#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    /// `None` until a TTL is applied.
    expires_at: Option<Instant>,
}

impl StoredValue {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| deadline > now)
    }
}

/// In-memory TTL store for single-node deployments and tests.
///
/// Expired entries are invisible to every read and are dropped lazily
/// or by [`MemoryTtlStore::purge_expired`]. Deadlines use the tokio
/// clock, so paused-time tests can advance past a TTL.
#[derive(Debug, Clone)]
pub struct MemoryTtlStore {
    /// Key → value with deadline.
    entries: Arc<DashMap<String, StoredValue>>,
    /// Upper bound on stored entries.
    max_capacity: u64,
}

impl MemoryTtlStore {
    /// Create a new in-memory store from configuration.
    pub fn new(config: &MemoryStoreConfig) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            max_capacity: config.max_capacity,
        }
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, stored| stored.is_live(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, "Purged expired entries");
        }
        removed
    }

    /// Number of live entries.
    pub fn live_len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|entry| entry.value().is_live(now))
            .count()
    }

    /// Remaining TTL of a live key, or `None` if the key is absent,
    /// expired, or has no expiry.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|stored| stored.is_live(now))
            .and_then(|stored| stored.expires_at)
            .map(|deadline| deadline - now)
    }

    fn ensure_capacity(&self, key: &str) -> AppResult<()> {
        if (self.entries.len() as u64) < self.max_capacity || self.entries.contains_key(key) {
            return Ok(());
        }
        self.purge_expired();
        if (self.entries.len() as u64) < self.max_capacity {
            return Ok(());
        }
        Err(AppError::store(format!(
            "In-memory store is full ({} entries)",
            self.max_capacity
        )))
    }
}

impl Default for MemoryTtlStore {
    fn default() -> Self {
        Self::new(&MemoryStoreConfig::default())
    }
}

#[async_trait]
impl TtlStore for MemoryTtlStore {
    async fn iter_keys(&self, pattern: &str) -> AppResult<Vec<String>> {
        let matcher = Pattern::new(pattern).map_err(|e| {
            AppError::with_source(
                ErrorKind::Validation,
                format!("Invalid key pattern '{pattern}'"),
                e,
            )
        })?;

        let now = Instant::now();
        let keys = self
            .entries
            .iter()
            .filter(|entry| entry.value().is_live(now) && matcher.matches(entry.key()))
            .map(|entry| entry.key().clone())
            .collect();
        Ok(keys)
    }

    async fn set_nx(&self, key: &str, value: &str) -> AppResult<bool> {
        self.ensure_capacity(key)?;

        let now = Instant::now();
        let fresh = StoredValue {
            value: value.to_string(),
            expires_at: None,
        };

        // The entry guard holds the shard lock, which makes check-and-insert atomic.
        let created = match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_live(now) {
                    false
                } else {
                    occupied.insert(fresh);
                    true
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(fresh);
                true
            }
        };
        Ok(created)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        let now = Instant::now();

        if ttl.is_zero() {
            let removed = self.entries.remove(key);
            return Ok(removed.is_some_and(|(_, stored)| stored.is_live(now)));
        }

        let refreshed = match self.entries.get_mut(key) {
            Some(mut stored) if stored.is_live(now) => {
                stored.expires_at = Some(now + ttl);
                true
            }
            _ => false,
        };

        if !refreshed {
            self.entries.remove_if(key, |_, stored| !stored.is_live(now));
        }
        Ok(refreshed)
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let now = Instant::now();
        let value = self
            .entries
            .get(key)
            .filter(|stored| stored.is_live(now))
            .map(|stored| stored.value.clone());
        Ok(value)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
