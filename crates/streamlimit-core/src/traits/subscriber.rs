//! Read-only view of users and their subscriptions.
//!
//! The tracker never owns or mutates user data; hosting services
//! implement these traits for whatever user model they already have.

use crate::types::id::UserId;

/// A subscription plan contributing concurrent streams.
pub trait StreamPlan {
    /// Number of concurrent streams this plan allows.
    fn stream_limit(&self) -> u32;
}

/// A user whose concurrent streams are tracked.
pub trait StreamUser {
    /// Subscription type exposed by this user model.
    type Plan: StreamPlan;

    /// The user's identifier.
    fn id(&self) -> UserId;

    /// Whether the user is authenticated.
    fn is_authenticated(&self) -> bool;

    /// The user's subscriptions, in provider order.
    fn subscriptions(&self) -> &[Self::Plan];
}

impl StreamPlan for u32 {
    fn stream_limit(&self) -> u32 {
        *self
    }
}

impl<P: StreamPlan + ?Sized> StreamPlan for &P {
    fn stream_limit(&self) -> u32 {
        (**self).stream_limit()
    }
}

impl<U: StreamUser + ?Sized> StreamUser for &U {
    type Plan = U::Plan;

    fn id(&self) -> UserId {
        (**self).id()
    }

    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }

    fn subscriptions(&self) -> &[Self::Plan] {
        (**self).subscriptions()
    }
}
