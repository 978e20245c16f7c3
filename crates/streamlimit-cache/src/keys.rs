//! Key builders for session markers.
//!
//! The write path (`track_stream`, `expire_stream`) and the read path
//! (counting, device enumeration) must agree on key layout, so every
//! marker key is built here.

use streamlimit_core::types::id::{InstanceId, UserId};

/// Namespace shared by all session marker keys.
pub const NAMESPACE: &str = "streamlimit";

/// Key of the marker for one playback instance:
/// `streamlimit:<user id>:<instance id>`.
pub fn stream_marker(user_id: UserId, instance_id: InstanceId) -> String {
    format!("{NAMESPACE}:{user_id}:{instance_id}")
}

/// Pattern matching every marker of a user: `streamlimit:<user id>:*`.
pub fn stream_marker_pattern(user_id: UserId) -> String {
    format!("{NAMESPACE}:{user_id}:*")
}

/// Escape Redis `MATCH` metacharacters so `literal` matches only itself.
pub fn escape_glob(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
