//! Concurrent stream limit type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of concurrent streams a user may hold.
///
/// The value is never below [`StreamLimit::DEFAULT`]. Deserialization
/// goes through [`StreamLimit::at_least_default`] as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct StreamLimit(u32);

impl StreamLimit {
    /// Floor granted to every user, including anonymous ones.
    pub const DEFAULT: Self = Self(1);

    /// Build a limit from a raw total, clamping up to the default floor.
    pub fn at_least_default(total: u32) -> Self {
        Self(total.max(Self::DEFAULT.0))
    }

    /// Return the numeric limit.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Whether `active_count` live streams already fill this limit.
    pub fn is_reached_by(self, active_count: u32) -> bool {
        active_count >= self.0
    }

    /// Streams still available before the limit is reached.
    pub fn remaining(self, active_count: u32) -> u32 {
        self.0.saturating_sub(active_count)
    }
}

impl Default for StreamLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for StreamLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StreamLimit {
    fn from(total: u32) -> Self {
        Self::at_least_default(total)
    }
}

impl From<StreamLimit> for u32 {
    fn from(limit: StreamLimit) -> u32 {
        limit.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor() {
        assert_eq!(StreamLimit::at_least_default(0), StreamLimit::DEFAULT);
        assert_eq!(StreamLimit::at_least_default(1).get(), 1);
        assert_eq!(StreamLimit::at_least_default(6).get(), 6);
    }

    #[test]
    fn test_is_reached_by() {
        let limit = StreamLimit::at_least_default(2);
        assert!(!limit.is_reached_by(0));
        assert!(!limit.is_reached_by(1));
        assert!(limit.is_reached_by(2));
        assert!(limit.is_reached_by(3));
    }

    #[test]
    fn test_remaining() {
        let limit = StreamLimit::at_least_default(3);
        assert_eq!(limit.remaining(1), 2);
        assert_eq!(limit.remaining(5), 0);
    }

    #[test]
    fn test_deserialize_clamps_to_floor() {
        let limit: StreamLimit = serde_json::from_str("0").unwrap();
        assert_eq!(limit, StreamLimit::DEFAULT);

        let limit: StreamLimit = serde_json::from_str("4").unwrap();
        assert_eq!(limit.get(), 4);
        assert_eq!(serde_json::to_string(&limit).unwrap(), "4");
    }
}
