//! Session marker CLI commands.

use std::time::Duration;

use clap::{Args, Subcommand};

use crate::output::{self, Notice, OutputFormat};
use streamlimit_core::config::AppConfig;
use streamlimit_core::error::AppError;
use streamlimit_core::types::id::{InstanceId, UserId};
use streamlimit_entity::{Subscription, User};
use streamlimit_tracker::StreamLimitTracker;

/// Arguments for stream commands
#[derive(Debug, Args)]
pub struct StreamArgs {
    /// Stream subcommand
    #[command(subcommand)]
    pub command: StreamCommand,
}

/// The user a command acts on
#[derive(Debug, Clone, Args)]
pub struct UserArgs {
    /// User ID
    #[arg(short, long)]
    pub user: UserId,
    /// Stream limit of one subscription (repeat for several)
    #[arg(short, long = "subscription", value_name = "LIMIT")]
    pub subscriptions: Vec<u32>,
    /// Treat the user as unauthenticated
    #[arg(long)]
    pub anonymous: bool,
}

impl UserArgs {
    fn to_user(&self) -> User {
        let subscriptions = self
            .subscriptions
            .iter()
            .enumerate()
            .map(|(i, &limit)| Subscription::new(format!("cli-{}", i + 1), limit))
            .collect();

        User {
            id: self.user,
            authenticated: !self.anonymous,
            subscriptions,
        }
    }
}

/// Stream subcommands
#[derive(Debug, Subcommand)]
pub enum StreamCommand {
    /// Count live streams
    Count(UserArgs),
    /// List the devices of live streams
    Devices(UserArgs),
    /// Show limit, live count, and devices
    Status(UserArgs),
    /// Register or refresh a stream without checking the limit
    Track {
        #[command(flatten)]
        user: UserArgs,
        /// Playback instance ID
        #[arg(short, long)]
        instance: InstanceId,
        /// Device ID (omit for legacy clients)
        #[arg(short, long)]
        device: Option<String>,
        /// Marker TTL in seconds
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Register a stream only if the user has room
    Admit {
        #[command(flatten)]
        user: UserArgs,
        /// Playback instance ID
        #[arg(short, long)]
        instance: InstanceId,
        /// Device ID (omit for legacy clients)
        #[arg(short, long)]
        device: Option<String>,
        /// Marker TTL in seconds
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// End a stream immediately
    Expire {
        #[command(flatten)]
        user: UserArgs,
        /// Playback instance ID
        #[arg(short, long)]
        instance: InstanceId,
    },
}

impl StreamCommand {
    /// Whether the command writes or removes markers.
    fn writes_markers(&self) -> bool {
        matches!(
            self,
            Self::Track { .. } | Self::Admit { .. } | Self::Expire { .. }
        )
    }
}

/// Refuse marker writes that no later invocation could observe.
fn ensure_markers_persist(command: &StreamCommand, config: &AppConfig) -> Result<(), AppError> {
    if command.writes_markers() && config.store.is_process_local() {
        return Err(AppError::configuration(format!(
            "store provider '{}' keeps markers only for the lifetime of this command; \
             set store.provider = \"redis\" (or STREAMLIMIT__STORE__PROVIDER=redis) to change streams",
            config.store.provider
        )));
    }
    Ok(())
}

/// Execute stream commands
pub async fn execute(
    args: &StreamArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    ensure_markers_persist(&args.command, &config)?;
    let tracker = StreamLimitTracker::from_config(&config).await?;

    match &args.command {
        StreamCommand::Count(user_args) => {
            let user = user_args.to_user();
            let active = tracker.current_stream_count(&user).await?;
            output::print_count(user.id, active, format);
        }
        StreamCommand::Devices(user_args) => {
            let devices = tracker.streaming_device_ids(&user_args.to_user()).await?;
            output::print_devices(&devices, format);
        }
        StreamCommand::Status(user_args) => {
            let status = tracker.status(&user_args.to_user()).await?;
            output::print_status(&status, format);
        }
        StreamCommand::Track {
            user,
            instance,
            device,
            ttl,
        } => {
            let user = user.to_user();
            tracker
                .track_stream(
                    &user,
                    *instance,
                    device.as_deref(),
                    ttl.map(Duration::from_secs),
                )
                .await?;
            output::notice(
                Notice::Done,
                &format!("Tracked stream {} for user {}", instance, user.id),
            );
        }
        StreamCommand::Admit {
            user,
            instance,
            device,
            ttl,
        } => {
            let user = user.to_user();
            let admission = tracker
                .admit(
                    &user,
                    *instance,
                    device.as_deref(),
                    ttl.map(Duration::from_secs),
                )
                .await?;
            output::print_admission(&admission, user.id, *instance, format);
        }
        StreamCommand::Expire { user, instance } => {
            let user = user.to_user();
            tracker.expire_stream(&user, *instance).await?;
            output::notice(
                Notice::Done,
                &format!("Expired stream {} for user {}", instance, user.id),
            );
        }
    }

    Ok(())
}
