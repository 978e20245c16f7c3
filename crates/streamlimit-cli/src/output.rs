//! Rendering of stream reports as terminal tables or JSON.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use streamlimit_core::types::device::DeviceMarker;
use streamlimit_core::types::id::{InstanceId, UserId};
use streamlimit_core::types::stream_limit::StreamLimit;
use streamlimit_tracker::{Admission, StreamStatus};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Kind of one-line notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Done,
    Warn,
    Fail,
}

impl Notice {
    fn symbol(self) -> &'static str {
        match self {
            Self::Done => "✓",
            Self::Warn => "⚠",
            Self::Fail => "✗",
        }
    }
}

/// Print a one-line notice. Failures go to stderr.
pub fn notice(kind: Notice, msg: &str) {
    match kind {
        Notice::Fail => eprintln!("{} {}", kind.symbol(), msg),
        _ => println!("{} {}", kind.symbol(), msg),
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => notice(Notice::Fail, &format!("Failed to render JSON: {e}")),
    }
}

/// Print a labelled configuration or report field.
pub fn field(label: &str, value: &str) {
    println!("  {:<12} {}", format!("{label}:"), value);
}

#[derive(Debug, Tabled)]
struct DeviceRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Legacy client")]
    legacy: &'static str,
}

impl From<&DeviceMarker> for DeviceRow {
    fn from(marker: &DeviceMarker) -> Self {
        Self {
            device: marker.to_string(),
            legacy: yes_no(marker.is_legacy()),
        }
    }
}

#[derive(Debug, Tabled)]
struct StatusRow {
    #[tabled(rename = "User")]
    user: UserId,
    #[tabled(rename = "Limit")]
    limit: StreamLimit,
    #[tabled(rename = "Live")]
    live: u32,
    #[tabled(rename = "Remaining")]
    remaining: u32,
    #[tabled(rename = "At limit")]
    at_limit: &'static str,
    #[tabled(rename = "Devices")]
    devices: String,
}

impl From<&StreamStatus> for StatusRow {
    fn from(status: &StreamStatus) -> Self {
        let devices: Vec<String> = status.devices.iter().map(ToString::to_string).collect();
        Self {
            user: status.user_id,
            limit: status.limit,
            live: status.active,
            remaining: status.remaining(),
            at_limit: yes_no(status.at_limit),
            devices: devices.join(", "),
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn render<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Print the live stream count of a user.
pub fn print_count(user_id: UserId, active: u32, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "user_id": user_id,
            "active": active,
        })),
        OutputFormat::Table => println!("User {user_id} has {active} live stream(s)"),
    }
}

/// Print the devices of a user's live streams.
pub fn print_devices(devices: &[DeviceMarker], format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(devices),
        OutputFormat::Table if devices.is_empty() => println!("No live streams."),
        OutputFormat::Table => println!("{}", render(devices.iter().map(DeviceRow::from))),
    }
}

/// Print a stream status snapshot.
pub fn print_status(status: &StreamStatus, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(status),
        OutputFormat::Table => println!("{}", render([StatusRow::from(status)])),
    }
}

/// Print the outcome of an admission request.
pub fn print_admission(
    admission: &Admission,
    user_id: UserId,
    instance_id: InstanceId,
    format: OutputFormat,
) {
    match (format, admission) {
        (OutputFormat::Json, _) => print_json(admission),
        (OutputFormat::Table, Admission::Granted { limit, refreshed }) => {
            let verb = if *refreshed { "Refreshed" } else { "Admitted" };
            notice(
                Notice::Done,
                &format!("{verb} stream {instance_id} for user {user_id} (limit {limit})"),
            );
        }
        (OutputFormat::Table, Admission::Denied { limit, active }) => notice(
            Notice::Warn,
            &format!("User {user_id} is at their limit ({active} of {limit} streams)"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_status_table_lists_devices() {
        let status = StreamStatus {
            user_id: UserId(123),
            limit: StreamLimit::at_least_default(2),
            active: 2,
            devices: vec![
                DeviceMarker::Device("roku".to_string()),
                DeviceMarker::Legacy,
            ],
            at_limit: true,
            checked_at: Utc::now(),
        };

        let table = render([StatusRow::from(&status)]);
        assert!(table.contains("Remaining"));
        assert!(table.contains("roku, legacy"));
        assert!(table.contains("yes"));
    }

    #[test]
    fn test_device_row_flags_legacy_clients() {
        let row = DeviceRow::from(&DeviceMarker::Legacy);
        assert_eq!(row.device, "legacy");
        assert_eq!(row.legacy, "yes");

        let row = DeviceRow::from(&DeviceMarker::Device("android".to_string()));
        assert_eq!(row.legacy, "no");
    }
}
