//! Stream tracker configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Marker TTL applied when a caller does not supply one.
///
/// Heartbeats arrive roughly every 60 seconds; the extra 10 seconds
/// absorb delivery jitter.
pub const DEFAULT_STREAM_TTL_SECONDS: u64 = 70;

/// Stream tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// TTL in seconds for session markers registered without an override.
    #[serde(default = "default_ttl")]
    pub default_ttl_seconds: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: default_ttl(),
        }
    }
}

impl TrackerConfig {
    /// The default marker TTL as a [`Duration`].
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }

    /// A zero default TTL would expire every marker as soon as it is set.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.default_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "tracker.default_ttl_seconds must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn default_ttl() -> u64 {
    DEFAULT_STREAM_TTL_SECONDS
}
