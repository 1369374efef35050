//! Tracker Proxy
//!
//! A small reverse proxy that lets a browser frontend reach two issue
//! tracking upstreams across origins.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                TRACKER PROXY                  │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐      ┌────────────────────────┐ │
//!   ──────────────────▶│  │  http   │─────▶│       upstream          │ │
//!                      │  │ server  │      │  phabricator │ gerrit   │ │
//!                      │  └─────────┘      └───────┬────────┬───────┘ │
//!                      │                           │        │         │
//!   Client Response    │  ┌─────────┐              ▼        ▼         │
//!   ◀──────────────────┼──│ relay   │◀──── streamed upstream body ◀───┼── Upstream
//!                      │  │(headers)│                                  │   Service
//!                      │  └─────────┘                                  │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐ │
//!                      │  │         Cross-Cutting Concerns           │ │
//!                      │  │   ┌─────────┐        ┌──────────────┐    │ │
//!                      │  │   │ config  │        │observability │    │ │
//!                      │  │   └─────────┘        └──────────────┘    │ │
//!                      │  └─────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! Routes:
//! - `/phabricator?ids=A|B|C` — POSTs a task search to the conduit API
//!   with the server-held token and relays the JSON stream.
//! - `/gerrit?id=...` or `?changeId=...` — GETs a change and relays it
//!   with `content-disposition` stripped so it renders inline.
//! - anything else — 404.
//!
//! Every response carries `Access-Control-Allow-Origin: *`.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use tracker_proxy::config::load_config;
use tracker_proxy::observability::init_logging;
use tracker_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "tracker-proxy")]
#[command(about = "CORS-bypassing proxy for Phabricator and Gerrit", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables PORT and
    /// PHAB_API_KEY override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    init_logging(&config.log.filter);

    tracing::info!("tracker-proxy v0.1.0 starting");
    tracing::info!(
        port = config.listener.port,
        phabricator_url = %config.phabricator.search_url,
        gerrit_url = %config.gerrit.base_url,
        token_configured = config.phabricator.api_token.is_some(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
