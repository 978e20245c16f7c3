//! # streamlimit
//!
//! Per-user concurrent video stream limits backed by TTL session markers.
//!
//! Each playback instance keeps a marker alive in a TTL store by sending
//! heartbeats; a user's live stream count is the number of markers that
//! have not expired, and their limit is the sum of their subscriptions'
//! stream limits (never less than one).
//!
//! ```no_run
//! use streamlimit::prelude::*;
//!
//! # async fn heartbeat(user: &User, instance: InstanceId) -> AppResult<()> {
//! let tracker = StreamLimitTracker::from_config(&AppConfig::default()).await?;
//! match tracker.admit(user, instance, Some("iphone_6_plus"), None).await? {
//!     Admission::Granted { .. } => { /* keep playing */ }
//!     Admission::Denied { .. } => { /* tell the player the limit is reached */ }
//! }
//! # Ok(())
//! # }
//! ```

pub use streamlimit_cache;
pub use streamlimit_core;
pub use streamlimit_entity;
pub use streamlimit_tracker;

/// Commonly used types.
pub mod prelude {
    pub use streamlimit_cache::StoreManager;
    pub use streamlimit_core::config::AppConfig;
    pub use streamlimit_core::error::{AppError, ErrorKind};
    pub use streamlimit_core::result::AppResult;
    pub use streamlimit_core::traits::{StreamPlan, StreamUser, TtlStore};
    pub use streamlimit_core::types::{DeviceMarker, InstanceId, StreamLimit, UserId};
    pub use streamlimit_entity::{Subscription, User};
    pub use streamlimit_tracker::{Admission, StreamLimitTracker, StreamStatus};
}
