//! Main application entry point (service binary).
//!
//! This is a thin wrapper around the `json_sentinel` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - Starting the status server and the batch loop, and stopping on Ctrl-C
//!
//! All core functionality is implemented in the library crate.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use json_sentinel::initialization::init_logger_with;
use json_sentinel::status_server::{bind_status_server, serve_status, StatusState};
use json_sentinel::{Config, HttpFetcher, ResultStore, Scheduler, SchedulerSettings};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; flags and the real environment still apply
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    config.validate().context("Invalid configuration")?;

    let fetcher = Arc::new(
        HttpFetcher::new(&config.user_agent, config.timeout())
            .context("Failed to initialize HTTP client")?,
    );
    let store = ResultStore::new(config.history_cap);

    let listener = bind_status_server(config.status_port)
        .await
        .context("Failed to start status server")?;
    let status_state = StatusState {
        store: store.clone(),
    };
    tokio::spawn(async move {
        if let Err(e) = serve_status(listener, status_state).await {
            warn!("Status server error: {}", e);
        }
    });

    info!(
        "Checking {} every batch with {} workers (proxy: {})",
        config.source_url, config.pool_width, config.proxy_base
    );
    let scheduler = Scheduler::new(fetcher, store, SchedulerSettings::from(&config));

    tokio::select! {
        _ = scheduler.run_forever() => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            info!("Shutdown requested, exiting");
        }
    }

    Ok(())
}
