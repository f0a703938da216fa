//! eventz-admin: container provisioning and event inspection.
//!
//! ## Usage
//! ```text
//! eventz-admin [--config <path>] ensure                      create the container if missing
//! eventz-admin [--config <path>] reset --yes                 delete all events, recreate container
//! eventz-admin [--config <path>] dump <aggregate_id>         print the stored sequence as JSON
//! eventz-admin [--config <path>] load <aggregate_id> <file>  persist a JSON array of events
//! ```
//!
//! ## Configuration
//! - --config: Path to a YAML config file (optional)
//! - EVENTZ_CONFIG: Path to a YAML config file (optional)
//! - EVENTZ__STORAGE__*: Overrides for individual storage settings
//! - EVENTZ_LOG: Log filter (default: info)

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use eventz_store::backend::init_backend;
use eventz_store::config::Config;
use eventz_store::provision::{ensure_container, reset_container};
use eventz_store::storage::{BlobEventStore, EventStore};
use eventz_store::utils::bootstrap::init_tracing;
use eventz_store::{EventCodec, JsonCodec};

#[derive(Parser, Debug)]
#[command(name = "eventz-admin")]
#[command(about = "Provision the event container and inspect stored sequences", long_about = None)]
struct Cli {
    /// YAML config file, layered over config.yaml and under EVENTZ__* overrides
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Create the configured container if it does not exist")]
    Ensure,
    #[command(about = "Delete every stored sequence and recreate the container")]
    Reset {
        /// Confirm the destructive reset
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "Print the stored sequence for an aggregate as JSON")]
    Dump {
        #[arg(value_name = "AGGREGATE_ID")]
        aggregate_id: String,
    },
    #[command(about = "Persist a JSON array of events under an aggregate id")]
    Load {
        #[arg(value_name = "AGGREGATE_ID")]
        aggregate_id: String,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let storage = &config.storage;

    // Provisioning is explicit here; the configured startup policy is not applied.
    let backend = init_backend(storage).await?;

    match cli.command {
        Command::Ensure => {
            let created = ensure_container(backend.as_ref(), &storage.container).await?;
            info!(container = %storage.container, created, "Container ready");
        }
        Command::Reset { yes: false } => {
            return Err("refusing to reset without --yes".into());
        }
        Command::Reset { yes: true } => {
            reset_container(backend.as_ref(), &storage.container).await?;
            info!(container = %storage.container, "Container reset");
        }
        Command::Dump { aggregate_id } => {
            let store = BlobEventStore::new(backend, storage.container.clone());
            let events = store.fetch(&aggregate_id).await?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        Command::Load { aggregate_id, file } => {
            let bytes = tokio::fs::read(&file).await?;
            let events = JsonCodec.decode(&bytes)?;
            let store = BlobEventStore::new(backend, storage.container.clone());
            store.persist(&aggregate_id, &events).await?;
            info!(aggregate_id = %aggregate_id, count = events.len(), "Loaded events");
        }
    }

    Ok(())
}
