//! Widget feed daemon.
//!
//! Loads configuration from the environment, then serves the widget API
//! until SIGINT or SIGTERM.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal::unix::{self, SignalKind};
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use gopool_widget::api::{self, AppState};
use gopool_widget::config::Config;
use gopool_widget::tracing::{self, prelude::*};
use gopool_widget::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("loading configuration")?;
    tracing::init(&config.daemon.log_level);

    if config.upstream.insecure_skip_verify {
        warn!("TLS verification of the upstream pool is disabled.");
    }

    let client = UpstreamClient::new(&config.upstream).context("building upstream client")?;
    let state = AppState::new(Arc::new(client));

    let running = CancellationToken::new();
    let tracker = TaskTracker::new();
    let server = {
        let running = running.clone();
        let listen = config.api.listen;
        tracker.spawn(async move {
            let result = api::serve(listen, state, running.clone()).await;
            // A server that stopped on its own takes the daemon down with it.
            running.cancel();
            result
        })
    };
    tracker.close();
    info!(
        pool = %config.upstream.pool_url,
        overview = %config.upstream.overview_url,
        "Started."
    );

    let mut sigint = unix::signal(SignalKind::interrupt())?;
    let mut sigterm = unix::signal(SignalKind::terminate())?;
    tokio::select! {
        _ = sigint.recv() => {},
        _ = sigterm.recv() => {},
        _ = running.cancelled() => {},
    }

    trace!("Shutting down.");
    running.cancel();

    tracker.wait().await;
    server.await?.context("API server")?;
    info!("Exiting.");
    Ok(())
}
