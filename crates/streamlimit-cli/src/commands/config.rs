//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, Notice, OutputFormat};
use streamlimit_core::config::AppConfig;
use streamlimit_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate configuration file
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => print_summary(&config),
            }
        }
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                output::notice(Notice::Done, &format!("Configuration '{}' is valid", config_path));
                print_summary(&config);
            }
            Err(e) => {
                output::notice(Notice::Fail, &format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to create dir: {}", e)))?;
            }

            tokio::fs::write(out_path, default_config)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write config: {}", e)))?;

            output::notice(Notice::Done, &format!("Default config written to '{}'", out_path));
        }
    }

    Ok(())
}

/// Print the settings that decide where markers live.
fn print_summary(config: &AppConfig) {
    output::field("Store", &config.store.provider);
    if config.store.provider == "redis" {
        output::field(
            "Redis",
            &streamlimit_cache::redis::client::mask_redis_url(&config.store.redis.url),
        );
        if !config.store.redis.key_prefix.is_empty() {
            output::field("Key prefix", &config.store.redis.key_prefix);
        }
    } else {
        output::field("Capacity", &config.store.memory.max_capacity.to_string());
    }
    output::field(
        "Default TTL",
        &format!("{}s", config.tracker.default_ttl_seconds),
    );
    output::field(
        "Logging",
        &format!("{} ({})", config.logging.level, config.logging.format),
    );
}
