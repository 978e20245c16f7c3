//! Stream limit tracker over session markers in a TTL store.
//!
//! Every playback instance is represented by one marker keyed
//! `streamlimit:<user id>:<instance id>`. Players send a heartbeat about
//! once a minute; each heartbeat calls [`StreamLimitTracker::track_stream`],
//! which extends the marker's TTL. When playback stops the heartbeats stop
//! and the marker expires on its own, so a user's live stream count is
//! simply the number of markers matching their key pattern.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use streamlimit_cache::StoreManager;
use streamlimit_cache::keys;
use streamlimit_core::config::AppConfig;
use streamlimit_core::config::tracker::{DEFAULT_STREAM_TTL_SECONDS, TrackerConfig};
use streamlimit_core::result::AppResult;
use streamlimit_core::traits::store::TtlStore;
use streamlimit_core::traits::subscriber::StreamUser;
use streamlimit_core::types::device::DeviceMarker;
use streamlimit_core::types::id::{InstanceId, UserId};
use streamlimit_core::types::stream_limit::StreamLimit;

use crate::admission::{Admission, StreamStatus};
use crate::limits::evaluate_limit;

/// Tracks concurrent streams per user on top of a shared TTL store.
///
/// The tracker keeps no state of its own beyond the store handle; every
/// count re-reads the store. Clones share the same store and many
/// trackers may run against one store without coordination.
#[derive(Debug, Clone)]
pub struct StreamLimitTracker {
    /// Store holding the session markers.
    store: Arc<dyn TtlStore>,
    /// TTL applied when `track_stream` is called without one.
    default_ttl: Duration,
}

impl StreamLimitTracker {
    /// TTL applied when neither the caller nor the configuration supplies one.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(DEFAULT_STREAM_TTL_SECONDS);

    /// Creates a tracker over an existing store with the default TTL.
    pub fn new(store: Arc<dyn TtlStore>) -> Self {
        Self {
            store,
            default_ttl: Self::DEFAULT_TTL,
        }
    }

    /// Creates a tracker over an existing store using tracker configuration.
    pub fn with_config(store: Arc<dyn TtlStore>, config: &TrackerConfig) -> Self {
        Self {
            store,
            default_ttl: config.default_ttl(),
        }
    }

    /// Creates a tracker bound to the store selected by configuration.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        config.validate()?;
        let manager = StoreManager::new(&config.store).await?;
        info!(
            provider = %config.store.provider,
            default_ttl_seconds = config.tracker.default_ttl_seconds,
            "Stream limit tracker initialized"
        );
        Ok(Self::with_config(manager.store(), &config.tracker))
    }

    /// The store holding the session markers.
    pub fn store(&self) -> &Arc<dyn TtlStore> {
        &self.store
    }

    /// TTL applied when `track_stream` is called without one.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Key of the marker for one playback instance.
    pub fn format_key(&self, user_id: UserId, instance_id: InstanceId) -> String {
        keys::stream_marker(user_id, instance_id)
    }

    /// Returns the total stream limit for a user.
    pub fn stream_limits<U: StreamUser + ?Sized>(&self, user: &U) -> StreamLimit {
        evaluate_limit(user)
    }

    /// Returns the number of live session markers for a user.
    pub async fn current_stream_count<U: StreamUser + ?Sized>(&self, user: &U) -> AppResult<u32> {
        let markers = self.live_markers(user.id()).await?;
        Ok(count_of(&markers))
    }

    /// Returns whether a user already fills their stream limit.
    pub async fn is_at_limit<U: StreamUser + ?Sized>(&self, user: &U) -> AppResult<bool> {
        let limit = self.stream_limits(user);
        let count = self.current_stream_count(user).await?;
        Ok(limit.is_reached_by(count))
    }

    /// Registers a playback instance or refreshes its marker.
    ///
    /// The marker value is the device id, or [`DeviceMarker::LEGACY_VALUE`]
    /// for clients that send none. An existing marker keeps its original
    /// value; only its TTL is reset. No limit check happens here, call
    /// [`is_at_limit`](Self::is_at_limit) or use [`admit`](Self::admit)
    /// to enforce the limit.
    pub async fn track_stream<U: StreamUser + ?Sized>(
        &self,
        user: &U,
        instance_id: InstanceId,
        device_id: Option<&str>,
        ttl: Option<Duration>,
    ) -> AppResult<()> {
        let key = self.format_key(user.id(), instance_id);
        let marker = DeviceMarker::from_device_id(device_id);
        let ttl = ttl.unwrap_or(self.default_ttl);

        let created = self.store.set_nx(&key, marker.as_str()).await?;
        self.store.expire(&key, ttl).await?;

        debug!(
            user_id = %user.id(),
            instance_id = %instance_id,
            device = %marker,
            ttl_seconds = ttl.as_secs(),
            created,
            "Tracked stream"
        );
        Ok(())
    }

    /// Ends a playback instance immediately by forcing its TTL to zero.
    ///
    /// Expiring a marker that is already gone is not an error.
    pub async fn expire_stream<U: StreamUser + ?Sized>(
        &self,
        user: &U,
        instance_id: InstanceId,
    ) -> AppResult<()> {
        let key = self.format_key(user.id(), instance_id);
        let existed = self.store.expire(&key, Duration::ZERO).await?;

        debug!(
            user_id = %user.id(),
            instance_id = %instance_id,
            existed,
            "Expired stream"
        );
        Ok(())
    }

    /// Returns the device recorded in every live marker of a user.
    pub async fn streaming_device_ids<U: StreamUser + ?Sized>(
        &self,
        user: &U,
    ) -> AppResult<Vec<DeviceMarker>> {
        let markers = self.live_markers(user.id()).await?;
        self.read_devices(&markers).await
    }

    /// Takes a snapshot of a user's limit, live count, and devices.
    pub async fn status<U: StreamUser + ?Sized>(&self, user: &U) -> AppResult<StreamStatus> {
        let limit = self.stream_limits(user);
        let markers = self.live_markers(user.id()).await?;
        let active = count_of(&markers);
        let devices = self.read_devices(&markers).await?;

        Ok(StreamStatus {
            user_id: user.id(),
            limit,
            active,
            devices,
            at_limit: limit.is_reached_by(active),
            checked_at: Utc::now(),
        })
    }

    /// Admits a playback instance if the user has room, then tracks it.
    ///
    /// An instance that already holds a live marker is a heartbeat and is
    /// always refreshed, even when the user is at their limit. The check
    /// and the registration are separate store calls, so two new instances
    /// racing for the last slot may both be admitted.
    pub async fn admit<U: StreamUser + ?Sized>(
        &self,
        user: &U,
        instance_id: InstanceId,
        device_id: Option<&str>,
        ttl: Option<Duration>,
    ) -> AppResult<Admission> {
        let limit = self.stream_limits(user);
        let key = self.format_key(user.id(), instance_id);
        let refreshed = self.store.get(&key).await?.is_some();

        if !refreshed {
            let active = self.current_stream_count(user).await?;
            if limit.is_reached_by(active) {
                warn!(
                    user_id = %user.id(),
                    instance_id = %instance_id,
                    limit = limit.get(),
                    active,
                    "Stream limit reached, denying new stream"
                );
                return Ok(Admission::Denied { limit, active });
            }
        }

        self.track_stream(user, instance_id, device_id, ttl).await?;
        Ok(Admission::Granted { limit, refreshed })
    }

    /// Live marker keys of a user.
    async fn live_markers(&self, user_id: UserId) -> AppResult<Vec<String>> {
        let pattern = keys::stream_marker_pattern(user_id);
        self.store.iter_keys(&pattern).await
    }

    /// Reads marker values, skipping keys that expired after enumeration.
    async fn read_devices(&self, markers: &[String]) -> AppResult<Vec<DeviceMarker>> {
        let mut devices = Vec::with_capacity(markers.len());
        for key in markers {
            if let Some(value) = self.store.get(key).await? {
                devices.push(DeviceMarker::from(value));
            }
        }
        Ok(devices)
    }
}

fn count_of(markers: &[String]) -> u32 {
    u32::try_from(markers.len()).unwrap_or(u32::MAX)
}
