//! Values stored in session markers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Device recorded in a session marker.
///
/// Older clients do not send a device id; their markers hold the
/// [`DeviceMarker::LEGACY_VALUE`] sentinel instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceMarker {
    /// A device id supplied by the client.
    Device(String),
    /// No device id was supplied.
    Legacy,
}

impl DeviceMarker {
    /// Stored value for markers registered without a device id.
    pub const LEGACY_VALUE: &'static str = "legacy";

    /// Marker for an optional device id.
    pub fn from_device_id(device_id: Option<&str>) -> Self {
        match device_id {
            Some(id) => Self::from_stored(id),
            None => Self::Legacy,
        }
    }

    /// Interpret a value read back from the store.
    ///
    /// A client that reports the literal device id `"legacy"` is
    /// indistinguishable from one that reports nothing.
    pub fn from_stored(value: &str) -> Self {
        Self::from(value.to_string())
    }

    /// The value written to the store.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Device(id) => id,
            Self::Legacy => Self::LEGACY_VALUE,
        }
    }

    /// Whether this marker came from a client without a device id.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy)
    }
}

impl fmt::Display for DeviceMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DeviceMarker {
    fn from(value: String) -> Self {
        if value == Self::LEGACY_VALUE {
            Self::Legacy
        } else {
            Self::Device(value)
        }
    }
}

impl From<DeviceMarker> for String {
    fn from(marker: DeviceMarker) -> String {
        match marker {
            DeviceMarker::Device(id) => id,
            DeviceMarker::Legacy => DeviceMarker::LEGACY_VALUE.to_string(),
        }
    }
}

impl PartialEq<str> for DeviceMarker {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for DeviceMarker {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_device_is_legacy() {
        let marker = DeviceMarker::from_device_id(None);
        assert!(marker.is_legacy());
        assert_eq!(marker.as_str(), "legacy");
    }

    #[test]
    fn test_device_round_trips_through_store_value() {
        let marker = DeviceMarker::from_device_id(Some("iphone_6_plus"));
        assert_eq!(DeviceMarker::from_stored(marker.as_str()), marker);
        assert_eq!(marker, "iphone_6_plus");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&vec![
            DeviceMarker::Device("android".to_string()),
            DeviceMarker::Legacy,
        ])
        .expect("serialize");
        assert_eq!(json, r#"["android","legacy"]"#);
    }

    #[test]
    fn test_stored_sentinel_reads_back_as_legacy() {
        assert_eq!(DeviceMarker::from_stored("legacy"), DeviceMarker::Legacy);
        assert_eq!(
            DeviceMarker::from("legacy".to_string()),
            DeviceMarker::Legacy
        );
        assert_eq!(
            DeviceMarker::from_device_id(Some("legacy")),
            DeviceMarker::Legacy
        );

        let markers: Vec<DeviceMarker> = serde_json::from_str(r#"["roku","legacy"]"#).unwrap();
        assert_eq!(
            markers,
            vec![DeviceMarker::Device("roku".to_string()), DeviceMarker::Legacy]
        );
    }
}
