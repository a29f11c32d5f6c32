mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use daybook_core::assistant::{Assistant, HttpAssistant};
use daybook_core::config::AppConfig;
use daybook_core::connectivity::ConnectivityMonitor;
use daybook_core::coordinator::EventCoordinator;
use daybook_core::remote::{HttpRemote, RemoteStore};
use daybook_core::store::{ChatLog, EventTable};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Offline-first personal calendar with best-effort remote sync")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an event
    New {
        title: String,

        /// Start time (RFC 3339, or "YYYY-MM-DDTHH:MM" taken as UTC)
        #[arg(short, long)]
        start: String,

        /// End time; defaults to one hour after start
        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        location: Option<String>,
    },
    /// List events in a time window
    Events {
        /// From this time (default: now)
        #[arg(long)]
        from: Option<String>,

        /// Until this time (default: one week out)
        #[arg(long)]
        to: Option<String>,
    },
    /// Check a candidate time range for double-bookings
    Conflicts {
        #[arg(short, long)]
        start: String,

        #[arg(short, long)]
        end: String,

        /// Event id being edited; excluded from its own conflict set
        #[arg(long)]
        exclude: Option<Uuid>,
    },
    /// Delete an event by id
    Delete { id: Uuid },
    /// Ask the assistant to handle a request in plain language
    Ask { message: String },
    /// Delete all local data (events, profile, chat history)
    Wipe {
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    if let Commands::Wipe { force } = &cli.command {
        return commands::wipe::run(&config, *force);
    }

    let coordinator = build_coordinator(&config).await?;
    let _watcher = coordinator.watch_connectivity();

    match cli.command {
        Commands::New {
            title,
            start,
            end,
            location,
        } => commands::new::run(&coordinator, title, start, end, location)?,
        Commands::Events { from, to } => commands::events::run(&coordinator, from, to)?,
        Commands::Conflicts {
            start,
            end,
            exclude,
        } => commands::conflicts::run(&coordinator, start, end, exclude)?,
        Commands::Delete { id } => commands::delete::run(&coordinator, id)?,
        Commands::Ask { message } => commands::ask::run(&coordinator, message).await?,
        Commands::Wipe { .. } => unreachable!("handled above"),
    }

    // Give in-flight best-effort pushes a chance to land before exit
    coordinator.flush_remote().await;
    Ok(())
}

/// Composition root: wires the store, remote client, assistant, and
/// connectivity monitor into a coordinator.
async fn build_coordinator(config: &AppConfig) -> Result<Arc<EventCoordinator>> {
    let store = EventTable::open(&config.data_dir)?;
    let chat = ChatLog::open(&config.data_dir)?;

    let remote: Option<Arc<dyn RemoteStore>> = match &config.remote_url {
        Some(url) => Some(Arc::new(HttpRemote::new(url.clone())?)),
        None => None,
    };
    let assistant: Option<Arc<dyn Assistant>> = match &config.assistant_url {
        Some(url) => Some(Arc::new(HttpAssistant::new(url.clone())?)),
        None => None,
    };

    // Start optimistic, then let a quick probe downgrade us; the browser
    // app gets this from window online/offline events instead
    let connectivity = ConnectivityMonitor::new(true);
    if let Some(remote) = &remote {
        if remote.health().await.is_err() {
            connectivity.set_online(false);
        }
    }

    let coordinator = EventCoordinator::new(store, chat, remote, assistant, connectivity)?;
    Ok(Arc::new(coordinator))
}
