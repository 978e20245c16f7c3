//! Admission outcomes and per-user stream snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use streamlimit_core::types::device::DeviceMarker;
use streamlimit_core::types::id::UserId;
use streamlimit_core::types::stream_limit::StreamLimit;

/// Result of asking the tracker to admit a playback instance.
///
/// Store failures are reported as errors, never as `Denied`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Admission {
    /// The instance is tracked and may play.
    Granted {
        /// The user's limit at decision time.
        limit: StreamLimit,
        /// `true` if the instance already held a live marker (heartbeat).
        refreshed: bool,
    },
    /// The user already fills their limit with other instances.
    Denied {
        /// The user's limit at decision time.
        limit: StreamLimit,
        /// Live markers counted at decision time.
        active: u32,
    },
}

impl Admission {
    /// Whether playback may proceed.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }

    /// The limit the decision was made against.
    pub fn limit(&self) -> StreamLimit {
        match self {
            Self::Granted { limit, .. } | Self::Denied { limit, .. } => *limit,
        }
    }
}

/// Snapshot of a user's live streams, for diagnostics and UI
/// ("you are streaming on: iPhone, legacy device").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamStatus {
    /// The user the snapshot describes.
    pub user_id: UserId,
    /// The user's effective limit.
    pub limit: StreamLimit,
    /// Live markers found.
    pub active: u32,
    /// Device of every live marker that could still be read.
    pub devices: Vec<DeviceMarker>,
    /// Whether `active` fills `limit`.
    pub at_limit: bool,
    /// When the snapshot was taken.
    pub checked_at: DateTime<Utc>,
}

impl StreamStatus {
    /// Streams still available before the limit is reached.
    pub fn remaining(&self) -> u32 {
        self.limit.remaining(self.active)
    }
}
