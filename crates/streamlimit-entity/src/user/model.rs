//! User entity model.

use serde::{Deserialize, Serialize};

use streamlimit_core::traits::StreamUser;
use streamlimit_core::types::id::UserId;

use crate::subscription::Subscription;

/// A user as seen by the stream tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Whether the request carrying this user was authenticated.
    pub authenticated: bool,
    /// Subscriptions in provider order.
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl User {
    /// An authenticated user with the given subscriptions.
    pub fn authenticated(id: UserId, subscriptions: Vec<Subscription>) -> Self {
        Self {
            id,
            authenticated: true,
            subscriptions,
        }
    }

    /// An unauthenticated user. Subscriptions may still be attached but
    /// never count towards the limit.
    pub fn anonymous(id: UserId) -> Self {
        Self {
            id,
            authenticated: false,
            subscriptions: Vec::new(),
        }
    }

    /// Builder-style helper to attach one more subscription.
    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }
}

impl StreamUser for User {
    type Plan = Subscription;

    fn id(&self) -> UserId {
        self.id
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }
}
