//! Item relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────┐
//!                        │                 RELAY                     │
//!   Client Request       │  ┌─────────┐    ┌──────────┐              │
//!   ─────────────────────┼─▶│  http   │───▶│ handlers │              │
//!                        │  │ server  │    └────┬─────┘              │
//!                        │  └─────────┘         │                    │
//!                        │                      ▼                    │
//!                        │              ┌───────────────┐            │
//!   Client Response      │              │ ClientService │────────────┼──▶ Upstream
//!   ◀────────────────────┼──────────────│  (reqwest)    │◀───────────┼─── :7070
//!                        │              └───────────────┘            │
//!                        │                                           │
//!                        │  config · observability · lifecycle       │
//!                        └──────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use item_relay::config::{load_config, validate_config, ConfigError, RelayConfig};
use item_relay::http::HttpServer;
use item_relay::lifecycle::{signals, Shutdown};
use item_relay::observability::logging;

#[derive(Parser)]
#[command(name = "item-relay")]
#[command(about = "Relays item lookups to an upstream item server", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Built-in defaults are used if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            let config = RelayConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        }
    };

    logging::init(&config.observability)?;

    tracing::info!("item-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        item_path = %config.upstream.item_path,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown.clone());

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
