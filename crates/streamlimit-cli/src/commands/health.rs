//! Store health check command.

use serde::Serialize;

use crate::output::{self, Notice, OutputFormat};
use streamlimit_core::error::AppError;

/// Health check result
#[derive(Debug, Serialize)]
struct HealthReport {
    /// Configured store provider
    provider: String,
    /// Whether the store answered
    healthy: bool,
}

/// Execute the health command
pub async fn execute(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let tracker = streamlimit_tracker::StreamLimitTracker::from_config(&config).await?;
    let healthy = tracker.store().health_check().await?;

    let report = HealthReport {
        provider: config.store.provider.clone(),
        healthy,
    };

    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table if healthy => {
            output::notice(Notice::Done, &format!("Store '{}' is reachable", report.provider))
        }
        OutputFormat::Table => {
            output::notice(Notice::Fail, &format!("Store '{}' did not answer", report.provider))
        }
    }

    if healthy {
        Ok(())
    } else {
        Err(AppError::service_unavailable("Store health check failed"))
    }
}
