//! Vanity import path server.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────┐
//!                     │                 VANITY SERVER                  │
//!                     │                                                │
//!   GET /foo          │  ┌─────────┐   lookup   ┌──────────────┐       │
//!   ──────────────────┼─▶│  http   │───────────▶│ ConfigStore  │       │
//!                     │  │ handler │◀───────────│  (ArcSwap)   │       │
//!   200 page / 404    │  └─────────┘            └──────▲───────┘       │
//!   ◀─────────────────┼───────┘                        │ replace       │
//!                     │                         ┌──────┴───────┐       │
//!                     │  interval ─────────────▶│   Reloader   │       │
//!                     │  SIGHUP / file watch ──▶│ fetch, parse │       │
//!                     │                         └──────┬───────┘       │
//!                     │                                │               │
//!                     └────────────────────────────────┼───────────────┘
//!                                                      ▼
//!                                       vanity.yaml (disk or http(s))
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use vanity_server::cli::{print_usage, Cli};
use vanity_server::lifecycle::signals::shutdown_on_ctrl_c;
use vanity_server::lifecycle::{Shutdown, VanityApp};
use vanity_server::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(config) = Cli::parse().into_config() else {
        print_usage()?;
        return Ok(());
    };

    logging::init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        config_source = %config.config_source,
        interval = ?config.refresh_interval,
        "vanity-server starting"
    );

    if let Some(address) = &config.metrics_address {
        metrics::init_metrics(address.parse()?)?;
    }

    let listener = TcpListener::bind(&config.bind_address).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_ctrl_c(shutdown.clone()));

    VanityApp::new(config)?.run(listener, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
