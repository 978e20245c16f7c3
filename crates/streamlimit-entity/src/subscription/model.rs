//! Subscription entity model.

use serde::{Deserialize, Serialize};

use streamlimit_core::traits::StreamPlan;

/// A subscription plan held by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Plan name, e.g. `"basic"` or `"family"`.
    pub plan: String,
    /// Number of concurrent streams the plan allows.
    pub stream_limit: u32,
}

impl Subscription {
    /// Create a subscription for a named plan.
    pub fn new(plan: impl Into<String>, stream_limit: u32) -> Self {
        Self {
            plan: plan.into(),
            stream_limit,
        }
    }
}

impl StreamPlan for Subscription {
    fn stream_limit(&self) -> u32 {
        self.stream_limit
    }
}
