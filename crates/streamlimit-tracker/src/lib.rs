//! # streamlimit-tracker
//!
//! Tracks concurrent video streams per user and decides admission
//! against limits derived from subscriptions.
//!
//! ## Modules
//!
//! - `limits`: Pure stream limit evaluation from subscriptions
//! - `tracker`: Session marker registration, expiry, counting, and enumeration
//! - `admission`: Admission outcomes and status snapshots

pub mod admission;
pub mod limits;
pub mod tracker;

pub use admission::{Admission, StreamStatus};
pub use limits::evaluate_limit;
pub use tracker::StreamLimitTracker;
