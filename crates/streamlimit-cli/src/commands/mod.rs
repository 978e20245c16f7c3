//! CLI command definitions and dispatch.

pub mod config;
pub mod health;
pub mod stream;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use streamlimit_core::config::AppConfig;
use streamlimit_core::error::AppError;

/// StreamLimit: concurrent video stream limits
#[derive(Debug, Parser)]
#[command(name = "streamlimit", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect and manage a user's session markers
    Stream(stream::StreamArgs),
    /// Check that the configured store is reachable
    Health,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Stream(args) => stream::execute(args, &self.config, self.format).await,
            Commands::Health => health::execute(&self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}
