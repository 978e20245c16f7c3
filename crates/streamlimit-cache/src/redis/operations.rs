//! Redis TTL store implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use streamlimit_core::config::store::RedisStoreConfig;
use streamlimit_core::error::{AppError, ErrorKind};
use streamlimit_core::result::AppResult;
use streamlimit_core::traits::store::TtlStore;

use super::client::RedisClient;

/// Redis-backed TTL store.
#[derive(Debug, Clone)]
pub struct RedisTtlStore {
    /// Redis client.
    client: RedisClient,
    /// `COUNT` hint for each `SCAN` round trip.
    scan_count: u32,
}

impl RedisTtlStore {
    /// Create a new Redis store over a connected client.
    pub fn new(client: RedisClient, config: &RedisStoreConfig) -> Self {
        Self {
            client,
            scan_count: config.scan_count.max(1),
        }
    }

    /// Connect and build the store in one step.
    pub async fn connect(config: &RedisStoreConfig) -> AppResult<Self> {
        let client = RedisClient::connect(config).await?;
        Ok(Self::new(client, config))
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Store, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl TtlStore for RedisTtlStore {
    async fn iter_keys(&self, pattern: &str) -> AppResult<Vec<String>> {
        let full_pattern = self.client.prefixed_pattern(pattern);
        let mut conn = self.client.conn_mut();

        // SCAN instead of KEYS so a large keyspace never blocks the server.
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&full_pattern)
                .arg("COUNT")
                .arg(self.scan_count)
                .query_async(&mut conn)
                .await
                .map_err(Self::map_err)?;

            keys.extend(
                batch
                    .iter()
                    .map(|key| self.client.strip_prefix(key).to_string()),
            );

            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may return a key more than once.
        keys.sort_unstable();
        keys.dedup();

        debug!(pattern, count = keys.len(), "Scanned keys matching pattern");
        Ok(keys)
    }

    async fn set_nx(&self, key: &str, value: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();

        // SET key value NX
        let result: Option<String> = redis::cmd("SET")
            .arg(&full_key)
            .arg(value)
            .arg("NX")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        Ok(result.is_some())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();

        // PEXPIRE with 0 deletes the key, matching the zero-TTL contract.
        let millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let result: bool = conn
            .pexpire(&full_key, millis)
            .await
            .map_err(Self::map_err)?;
        Ok(result)
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
