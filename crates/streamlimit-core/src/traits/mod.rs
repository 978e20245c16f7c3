//! Core traits defined in `streamlimit-core` and implemented by other crates.

pub mod store;
pub mod subscriber;

pub use store::TtlStore;
pub use subscriber::{StreamPlan, StreamUser};
