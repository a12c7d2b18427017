//! Configuration management for gopool-widget.
//!
//! Configuration comes from `GOPOOL_*` environment variables layered over
//! built-in defaults that match a stock goPool install on the local network.
//! Nothing here is global: the loaded [`Config`] is handed to the upstream
//! client and the API server when they are constructed.

use serde::{Deserialize, Serialize};
use std::{env, net::SocketAddr, time::Duration};

use crate::error::{Error, Result};

/// Default pool status endpoint.
pub const DEFAULT_POOL_URL: &str = "https://192.168.6.6:23443/api/pool";

/// Default overview status endpoint.
pub const DEFAULT_OVERVIEW_URL: &str = "https://192.168.6.6:23443/api/overview";

/// Default per-request upstream timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent sent upstream. Some goPool front ends reject unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Default listen address for the widget API.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:23000";

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Daemon configuration
    pub daemon: DaemonConfig,

    /// Upstream pool API
    pub upstream: UpstreamConfig,

    /// API server configuration
    pub api: ApiConfig,
}

/// Daemon process configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DaemonConfig {
    /// Default log level, overridden by RUST_LOG
    pub log_level: String,
}

/// Upstream goPool endpoints and how to reach them.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UpstreamConfig {
    /// Pool status URL
    pub pool_url: String,

    /// Overview status URL
    pub overview_url: String,

    /// Per-request timeout
    #[serde(with = "secs")]
    pub timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,

    /// Skip TLS certificate and hostname verification.
    ///
    /// goPool serves its API with a self-signed certificate on the LAN, so
    /// this defaults to true. Anyone able to intercept traffic between the
    /// widget and the pool can then feed it arbitrary statistics. Set
    /// `GOPOOL_INSECURE_SKIP_VERIFY=false` once the pool has a certificate
    /// the system trusts.
    pub insecure_skip_verify: bool,
}

/// API server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    /// Listen address
    pub listen: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daemon: DaemonConfig {
                log_level: "info".into(),
            },
            upstream: UpstreamConfig::default(),
            api: ApiConfig {
                listen: DEFAULT_LISTEN
                    .parse()
                    .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 23000))),
            },
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            pool_url: DEFAULT_POOL_URL.into(),
            overview_url: DEFAULT_OVERVIEW_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.into(),
            insecure_skip_verify: true,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("GOPOOL_POOL_URL") {
            config.upstream.pool_url = url;
        }
        if let Some(url) = get("GOPOOL_OVERVIEW_URL") {
            config.upstream.overview_url = url;
        }
        if let Some(secs) = get("GOPOOL_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("GOPOOL_TIMEOUT_SECS: invalid seconds '{secs}'"))
            })?;
            if secs == 0 {
                return Err(Error::Config("GOPOOL_TIMEOUT_SECS must be non-zero".into()));
            }
            config.upstream.timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = get("GOPOOL_USER_AGENT") {
            config.upstream.user_agent = agent;
        }
        if let Some(flag) = get("GOPOOL_INSECURE_SKIP_VERIFY") {
            config.upstream.insecure_skip_verify = parse_bool(&flag).ok_or_else(|| {
                Error::Config(format!("GOPOOL_INSECURE_SKIP_VERIFY: invalid boolean '{flag}'"))
            })?;
        }
        if let Some(listen) = get("GOPOOL_LISTEN") {
            config.api.listen = listen.trim().parse().map_err(|_| {
                Error::Config(format!("GOPOOL_LISTEN: invalid socket address '{listen}'"))
            })?;
        }
        if let Some(level) = get("GOPOOL_LOG") {
            config.daemon.log_level = level;
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// Durations are written as whole seconds.
mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
