//! Stream limit evaluation: derives a user's concurrent stream allowance.
//!
//! Resolution:
//! 1. Unauthenticated users get the default limit
//! 2. Authenticated users get the sum of their subscription limits
//! 3. The result is never below the default limit

use streamlimit_core::traits::subscriber::{StreamPlan, StreamUser};
use streamlimit_core::types::stream_limit::StreamLimit;

/// Total concurrent streams allowed for `user`.
///
/// Pure function of its input: no I/O, no mutation.
pub fn evaluate_limit<U: StreamUser + ?Sized>(user: &U) -> StreamLimit {
    if !user.is_authenticated() {
        return StreamLimit::DEFAULT;
    }

    let total = user
        .subscriptions()
        .iter()
        .fold(0u32, |sum, plan| sum.saturating_add(plan.stream_limit()));

    StreamLimit::at_least_default(total)
}
