//! Upstream status documents as served by goPool.
//!
//! Every field tolerates being absent or `null`; missing numbers read as 0.
//! Unknown fields are ignored.

use serde::{Deserialize, Deserializer};

/// Body of the pool status endpoint.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PoolStatus {
    /// Pool process uptime in nanoseconds.
    #[serde(rename = "uptime", default, deserialize_with = "null_as_default")]
    pub uptime_nanoseconds: u64,
    /// Pool-wide hashrate in H/s, if the pool reports it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pool_hashrate: Option<f64>,
    /// Minimum share difficulty, passed through as sent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_difficulty: Option<serde_json::Number>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accepted: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rejected: u64,
}

/// Body of the overview endpoint.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct OverviewStatus {
    /// Best shares, highest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub best_shares: Vec<BestShare>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub workers: Vec<WorkerStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_miners: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pool_tag: Option<String>,
    /// Fallback when the pool endpoint omits its hashrate.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pool_hashrate: f64,
    /// Share rate, passed through as sent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub shares_per_minute: Option<serde_json::Number>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BestShare {
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: f64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct WorkerStatus {
    /// Short-window moving average hashrate in H/s.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rolling_hashrate: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
