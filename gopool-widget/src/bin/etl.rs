//! One-shot widget report.
//!
//! Fetches both upstream documents once and prints the report to stdout,
//! using the same environment configuration as the daemon.

use std::env;

use anyhow::{Context, Result};
use time::OffsetDateTime;

use gopool_widget::config::Config;
use gopool_widget::report;
use gopool_widget::tracing;
use gopool_widget::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> Result<()> {
    let structured = match env::args().nth(1).as_deref() {
        None => false,
        Some("--json") => true,
        Some(other) => {
            eprintln!("Unknown argument: {}", other);
            eprintln!("Usage: gopool-etl [--json]");
            std::process::exit(2);
        }
    };

    let config = Config::from_env().context("loading configuration")?;
    tracing::init_stderr("warn");

    let client = UpstreamClient::new(&config.upstream).context("building upstream client")?;
    let now = OffsetDateTime::now_utc();

    if structured {
        let report = report::collect(&client, now).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report::combined_data(&client, now).await);
    }

    Ok(())
}
