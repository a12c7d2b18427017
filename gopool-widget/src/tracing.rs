//! Provide tracing, tailored to this program.
//!
//! Binaries call [`init`] once at startup to install a subscriber. The rest
//! of the crate can `use crate::tracing::prelude::*` for the level macros.

use std::env;
use std::str::FromStr;
use time::OffsetDateTime;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt::{format::Writer, time::FormatTime},
    prelude::*,
};

pub mod prelude {
    #[allow(unused_imports)]
    pub use tracing::{debug, error, info, trace, warn};
}

use prelude::*;

/// Initialize logging at `default_level` (e.g. "info").
///
/// Under systemd (JOURNAL_STREAM set) events go to journald; otherwise to
/// stdout, filtered by RUST_LOG when present. An unrecognized level falls
/// back to INFO.
pub fn init(default_level: &str) {
    let level = LevelFilter::from_str(default_level).unwrap_or(LevelFilter::INFO);

    if env::var("JOURNAL_STREAM").is_ok() {
        match tracing_journald::layer() {
            Ok(layer) => {
                tracing_subscriber::registry()
                    .with(level)
                    .with(layer)
                    .init();
                return;
            }
            Err(e) => {
                use_stdout(level);
                error!("Failed to initialize journald logging ({e}), using stdout.");
                return;
            }
        }
    }

    use_stdout(level);
}

/// Initialize logging to stderr only, for tools whose stdout is their output.
pub fn init_stderr(default_level: &str) {
    let level = LevelFilter::from_str(default_level).unwrap_or(LevelFilter::INFO);

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTimer)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn use_stdout(level: LevelFilter) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer().with_timer(LocalTimer))
        .init();
}

// RUST_LOG wins over the configured default level.
fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var("RUST_LOG")
        .from_env_lossy()
}

// Local time to the nearest second; the default UTC RFC 3339 stamp is noise
// on a LAN widget.
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let stamp = now
            .format(time::macros::format_description!("[hour]:[minute]:[second]"))
            .map_err(|_| std::fmt::Error)?;
        write!(w, "{stamp}")
    }
}
