//! # streamlimit-entity
//!
//! Plain user and subscription models implementing the
//! [`StreamUser`](streamlimit_core::traits::StreamUser) and
//! [`StreamPlan`](streamlimit_core::traits::StreamPlan) traits. Services
//! with their own user model can implement the traits directly instead.

pub mod subscription;
pub mod user;

pub use subscription::Subscription;
pub use user::User;
