//! Shared test helpers for integration tests.

use std::sync::Arc;

use streamlimit::prelude::*;
use streamlimit::streamlimit_cache::memory::MemoryTtlStore;

/// Tracker plus a handle on its store for inspection.
pub struct TestApp {
    /// The tracker under test
    pub tracker: StreamLimitTracker,
    /// The store behind the tracker
    pub store: Arc<MemoryTtlStore>,
}

impl TestApp {
    /// Create a tracker over a fresh in-memory store
    pub fn new() -> Self {
        let store = Arc::new(MemoryTtlStore::default());
        let tracker = StreamLimitTracker::new(store.clone());
        Self { tracker, store }
    }

    /// Store key of a marker
    pub fn key(&self, user: &User, instance: u64) -> String {
        self.tracker.format_key(user.id, InstanceId(instance))
    }
}

/// An authenticated user holding one subscription per limit
pub fn subscriber(id: u64, limits: &[u32]) -> User {
    let subscriptions = limits
        .iter()
        .enumerate()
        .map(|(i, &limit)| Subscription::new(format!("plan-{}", i + 1), limit))
        .collect();
    User::authenticated(UserId(id), subscriptions)
}
