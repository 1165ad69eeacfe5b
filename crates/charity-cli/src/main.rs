//! Charity platform CLI - inspect roles, campaigns and users from a terminal.
//!
//! Session state is kept in the configured storage backend (a JSON file
//! directory or the OS keychain), so a token stored by another tool on this
//! machine is picked up here.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use charity_core::notify::ToastQueue;
use charity_core::services::CampaignQuery;
use charity_core::utils::{format_short_date, relative_time, truncate};
use charity_core::{AppContext, Config, SessionStatus};

/// Directory for rolling log files; unset means stderr only
const LOG_DIR_ENV: &str = "CHARITY_LOG_DIR";

/// Maximum description length shown in campaign listings
const DESCRIPTION_PREVIEW_CHARS: usize = 60;

#[derive(Parser)]
#[command(name = "charity")]
#[command(about = "Inspect roles, campaigns and users on the charity platform")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Show whether the stored session is valid
    Status,
    /// Clear the stored session
    Logout,
    /// List roles
    Roles,
    /// Show one role
    Role { id: i64 },
    /// List campaigns, optionally filtered by status
    Campaigns { status: Option<String> },
    /// Show one campaign
    Campaign { id: i64 },
    /// List users
    Users,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "charity.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

async fn run(command: Command, ctx: &AppContext) -> Result<()> {
    match command {
        Command::Status => {
            let status = ctx.check_session();
            match status {
                SessionStatus::Anonymous => println!("Not logged in"),
                SessionStatus::Expired => println!("Session expired"),
                SessionStatus::Active | SessionStatus::ExpiringSoon => {
                    let minutes = ctx.session().minutes_until_expiry();
                    println!("Logged in, token expires in {} minutes", minutes);
                }
            }
        }
        Command::Logout => ctx.logout(),
        Command::Roles => {
            for role in ctx.roles().list_roles().await? {
                match role.description() {
                    Some(description) => println!("{:>5}  {}  ({})", role.id, role.name, description),
                    None => println!("{:>5}  {}", role.id, role.name),
                }
            }
        }
        Command::Role { id } => {
            let role = ctx.roles().get_role(id).await?;
            println!("{}", serde_json::to_string_pretty(&role)?);
        }
        Command::Campaigns { status } => {
            let query = CampaignQuery {
                status,
                ..CampaignQuery::default()
            };
            for campaign in ctx.campaigns().list_campaigns(query).await? {
                let description = campaign.description.as_deref().unwrap_or("");
                println!(
                    "{:>5}  {}  {} / {} ({}%)  {}",
                    campaign.id,
                    campaign.title,
                    campaign.raised_display(),
                    campaign.goal_display(),
                    campaign.progress_percent(),
                    truncate(description, DESCRIPTION_PREVIEW_CHARS)
                );
            }
        }
        Command::Campaign { id } => {
            let campaign = ctx.campaigns().get_campaign(id).await?;
            println!("{}", campaign.title);
            if let Some(ref description) = campaign.description {
                println!("{}", description);
            }
            println!(
                "Raised {} of {} ({}%)",
                campaign.raised_display(),
                campaign.goal_display(),
                campaign.progress_percent()
            );
            if let Some(end) = campaign.end_date {
                let remaining = campaign.time_remaining().unwrap_or_default();
                println!("Ends {} - {}", format_short_date(&end), remaining);
            }
        }
        Command::Users => {
            for user in ctx.users().list_users().await? {
                let joined = user
                    .created_at
                    .map(|at| format!("joined {}", relative_time(&at)))
                    .unwrap_or_default();
                println!(
                    "{:>5}  {}  <{}>  {}  {}",
                    user.id,
                    user.display_name(),
                    user.email,
                    user.role_name(),
                    joined
                );
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = init_tracing();

    let cli = Cli::parse();

    let config = Config::load()?;
    info!(api = %config.api_base_url, "Charity CLI starting");

    let storage = config.open_storage()?;
    let toasts = Arc::new(ToastQueue::default());
    let ctx = AppContext::new(&config, storage, toasts.clone())?;

    let result = run(cli.command, &ctx).await;

    for toast in toasts.drain() {
        eprintln!("[{:?}] {}", toast.kind, toast.message);
    }

    result
}
