//! Widget report assembly.
//!
//! [`CombinedReport::build`] turns one pool status and one overview into the
//! three records the dashboard widget displays. It is pure: the caller
//! supplies the update timestamp, and absent upstream values have already
//! been defaulted during parsing, so building cannot fail.

mod format;
mod wire;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::error::FetchError;
use crate::upstream::{OverviewStatus, PoolStatus, StatusSource};

pub use format::{format_units, format_uptime, round_to, shares_per_second};
pub use wire::to_legacy_json;

/// Pool tag shown when the overview does not report one.
pub const DEFAULT_POOL_TAG: &str = "/rodb-goPool/";

/// Prefix of the legacy body when the report could not be produced.
pub const ERROR_PREFIX: &str = "ETL Error: ";

/// First line: pool runtime and miner counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusLine {
    /// Pool uptime as "{d}d {h}h {m}m {s}s"
    pub runtime: String,
    /// Unix seconds when this report was built
    pub lastupdate: i64,
    #[serde(rename = "Users")]
    pub users: u64,
    #[serde(rename = "Workers")]
    pub workers: u64,
    #[serde(rename = "Idle")]
    pub idle: u64,
    #[serde(rename = "Disconnected")]
    pub disconnected: u64,
}

/// Second line: hashrate breakdown, pre-formatted with unit suffixes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HashrateLine {
    pub hashrate1m: String,
    pub hashrate5m: String,
    pub hashrate15m: String,
    pub hashrate1hr: String,
    pub hashrate6hr: String,
    pub hashrate1d: String,
    pub hashrate7d: String,
    #[serde(rename = "Pool Tag")]
    pub pool_tag: String,
}

/// Third line: share statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShareLine {
    /// Pool minimum difficulty, as reported upstream
    #[schema(value_type = f64)]
    pub diff: serde_json::Number,
    pub accepted: u64,
    pub rejected: u64,
    pub bestshare: String,
    #[serde(rename = "SPS1m")]
    pub sps_1m: f64,
    #[serde(rename = "SPS5m")]
    pub sps_5m: f64,
    #[serde(rename = "SPS15m")]
    pub sps_15m: f64,
    #[serde(rename = "SPS1h")]
    pub sps_1h: f64,
    /// Upstream shares per minute; integers as sent, floats to 2 decimals
    #[serde(rename = "Shares per min")]
    #[schema(value_type = f64)]
    pub shares_per_min: serde_json::Number,
}

/// The full widget report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CombinedReport {
    pub status: StatusLine,
    pub hashrate: HashrateLine,
    pub shares: ShareLine,
}

impl CombinedReport {
    /// Combine upstream documents into a report stamped with `now`.
    pub fn build(pool: &PoolStatus, overview: &OverviewStatus, now: OffsetDateTime) -> Self {
        let best_share = overview
            .best_shares
            .first()
            .map_or(0.0, |share| share.difficulty);

        let uptime = format_uptime(pool.uptime_nanoseconds / 1_000_000_000);

        let rolling: f64 = overview.workers.iter().map(|w| w.rolling_hashrate).sum();
        let rolling = format_units(rolling);

        let pool_hashrate = pool.pool_hashrate.unwrap_or(overview.pool_hashrate);

        let shares_per_minute = overview.shares_per_minute.clone().unwrap_or_else(|| 0.into());
        let sps = shares_per_second(shares_per_minute.as_f64().unwrap_or(0.0));

        Self {
            status: StatusLine {
                runtime: uptime,
                lastupdate: now.unix_timestamp(),
                users: overview.active_miners,
                workers: overview.active_miners,
                idle: 0,
                disconnected: 0,
            },
            hashrate: HashrateLine {
                hashrate1m: rolling.clone(),
                hashrate5m: rolling.clone(),
                hashrate15m: rolling,
                hashrate1hr: "0".into(),
                hashrate6hr: "0".into(),
                hashrate1d: "0".into(),
                hashrate7d: format_units(pool_hashrate),
                pool_tag: overview
                    .pool_tag
                    .clone()
                    .unwrap_or_else(|| DEFAULT_POOL_TAG.into()),
            },
            shares: ShareLine {
                diff: pool.min_difficulty.clone().unwrap_or_else(|| 0.into()),
                accepted: pool.accepted,
                rejected: pool.rejected,
                bestshare: format_units(best_share),
                sps_1m: sps,
                sps_5m: sps,
                sps_15m: sps,
                sps_1h: sps,
                shares_per_min: round_number(shares_per_minute, 2),
            },
        }
    }
}

// Integers pass through untouched; floats are rounded.
fn round_number(n: serde_json::Number, places: usize) -> serde_json::Number {
    match n.as_f64() {
        Some(v) if n.is_f64() => serde_json::Number::from_f64(round_to(v, places)).unwrap_or(n),
        _ => n,
    }
}

/// Fetch both documents from `source` and build a report.
///
/// The pool document is fetched first, then the overview. Either failure
/// aborts the whole report.
pub async fn collect(
    source: &dyn StatusSource,
    now: OffsetDateTime,
) -> Result<CombinedReport, FetchError> {
    let pool = source.pool_status().await?;
    let overview = source.overview_status().await?;
    Ok(CombinedReport::build(&pool, &overview, now))
}

/// Fetch, build, and render the legacy widget body.
///
/// Failures are rendered in-band as "ETL Error: <message>".
pub async fn combined_data(source: &dyn StatusSource, now: OffsetDateTime) -> String {
    let rendered = match collect(source, now).await {
        Ok(report) => to_legacy_json(&report).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    rendered.unwrap_or_else(|message| format!("{ERROR_PREFIX}{message}"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::upstream::{BestShare, WorkerStatus};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use time::macros::datetime;

    pub(crate) const NOW: OffsetDateTime = datetime!(2026-01-01 00:00:00 UTC);

    pub(crate) fn sample_pool() -> PoolStatus {
        PoolStatus {
            uptime_nanoseconds: 61_000_000_000,
            pool_hashrate: Some(5e8),
            min_difficulty: Some(1.into()),
            accepted: 10,
            rejected: 1,
        }
    }

    pub(crate) fn sample_overview() -> OverviewStatus {
        OverviewStatus {
            best_shares: vec![BestShare { difficulty: 42.0 }],
            workers: vec![WorkerStatus {
                rolling_hashrate: 1000.0,
            }],
            active_miners: 2,
            pool_tag: Some("/test/".into()),
            pool_hashrate: 0.0,
            shares_per_minute: Some(30.into()),
        }
    }

    /// Canned documents, or a failure on the pool fetch.
    pub(crate) struct FakeSource {
        pub pool: Option<PoolStatus>,
        pub overview: OverviewStatus,
        pub calls: AtomicUsize,
    }

    impl FakeSource {
        pub(crate) fn healthy() -> Self {
            Self {
                pool: Some(sample_pool()),
                overview: sample_overview(),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                pool: None,
                ..Self::healthy()
            }
        }
    }

    #[async_trait]
    impl StatusSource for FakeSource {
        async fn pool_status(&self) -> Result<PoolStatus, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pool.clone().ok_or_else(|| FetchError::Status {
                url: "https://pool.test/api/pool".into(),
                status: StatusCode::BAD_GATEWAY,
            })
        }

        async fn overview_status(&self) -> Result<OverviewStatus, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.overview.clone())
        }
    }

    #[test]
    fn end_to_end_sample() {
        let report = CombinedReport::build(&sample_pool(), &sample_overview(), NOW);

        assert_eq!(report.status.runtime, "0d 0h 1m 1s");
        assert_eq!(report.status.lastupdate, NOW.unix_timestamp());
        assert_eq!(report.status.users, 2);
        assert_eq!(report.status.workers, 2);
        assert_eq!(report.hashrate.hashrate1m, "1.00k");
        assert_eq!(report.hashrate.hashrate15m, "1.00k");
        assert_eq!(report.hashrate.hashrate7d, "500.00M");
        assert_eq!(report.hashrate.pool_tag, "/test/");
        assert_eq!(report.shares.bestshare, "42");
        assert_eq!(report.shares.sps_1m, 0.5);
        assert_eq!(report.shares.sps_1h, 0.5);
        assert_eq!(report.shares.shares_per_min, serde_json::Number::from(30));
        assert_eq!(report.shares.diff, serde_json::Number::from(1));
        assert_eq!(report.shares.accepted, 10);
        assert_eq!(report.shares.rejected, 1);
    }

    #[test]
    fn empty_best_shares_format_as_zero() {
        let overview = OverviewStatus {
            best_shares: vec![],
            ..sample_overview()
        };
        let report = CombinedReport::build(&sample_pool(), &overview, NOW);
        assert_eq!(report.shares.bestshare, "0");
    }

    #[test]
    fn first_best_share_wins() {
        let overview = OverviewStatus {
            best_shares: vec![
                BestShare { difficulty: 7.0 },
                BestShare { difficulty: 2e6 },
            ],
            ..sample_overview()
        };
        let report = CombinedReport::build(&sample_pool(), &overview, NOW);
        assert_eq!(report.shares.bestshare, "7");
    }

    #[test]
    fn rolling_hashrate_sums_workers() {
        let overview = OverviewStatus {
            workers: vec![
                WorkerStatus {
                    rolling_hashrate: 10.0,
                },
                WorkerStatus {
                    rolling_hashrate: 20.0,
                },
            ],
            ..sample_overview()
        };
        let report = CombinedReport::build(&sample_pool(), &overview, NOW);
        assert_eq!(report.hashrate.hashrate1m, "30");
        assert_eq!(report.hashrate.hashrate5m, "30");
    }

    #[test]
    fn zero_shares_per_minute() {
        let overview = OverviewStatus {
            shares_per_minute: None,
            ..sample_overview()
        };
        let report = CombinedReport::build(&sample_pool(), &overview, NOW);
        assert_eq!(report.shares.sps_1m, 0.0);
        assert_eq!(report.shares.sps_5m, 0.0);
        assert_eq!(report.shares.sps_15m, 0.0);
        assert_eq!(report.shares.sps_1h, 0.0);
    }

    #[test]
    fn float_shares_per_minute_rounds_to_two_places() {
        let overview = OverviewStatus {
            shares_per_minute: serde_json::Number::from_f64(2.675),
            ..sample_overview()
        };
        let report = CombinedReport::build(&sample_pool(), &overview, NOW);
        assert_eq!(
            report.shares.shares_per_min,
            serde_json::Number::from_f64(2.67).unwrap()
        );
        assert_eq!(report.shares.sps_1m, 0.04458);
    }

    #[test]
    fn zero_float_shares_per_minute_keeps_float_kind() {
        let overview = OverviewStatus {
            shares_per_minute: serde_json::Number::from_f64(0.0),
            ..sample_overview()
        };
        let report = CombinedReport::build(&sample_pool(), &overview, NOW);
        assert!(report.shares.shares_per_min.is_f64());
        assert_eq!(report.shares.sps_1m, 0.0);
    }

    #[test]
    fn pool_hashrate_falls_back_to_overview() {
        let pool = PoolStatus {
            pool_hashrate: None,
            ..sample_pool()
        };
        let overview = OverviewStatus {
            pool_hashrate: 2.5e12,
            ..sample_overview()
        };
        let report = CombinedReport::build(&pool, &overview, NOW);
        assert_eq!(report.hashrate.hashrate7d, "2.50T");
    }

    #[test]
    fn empty_documents_build_zeroed_report() {
        let report =
            CombinedReport::build(&PoolStatus::default(), &OverviewStatus::default(), NOW);
        assert_eq!(report.status.runtime, "0d 0h 0m 0s");
        assert_eq!(report.status.users, 0);
        assert_eq!(report.hashrate.hashrate1m, "0");
        assert_eq!(report.hashrate.hashrate7d, "0");
        assert_eq!(report.hashrate.pool_tag, DEFAULT_POOL_TAG);
        assert_eq!(report.shares.diff, serde_json::Number::from(0));
        assert_eq!(report.shares.bestshare, "0");
    }

    #[tokio::test]
    async fn collect_fetches_pool_then_overview() {
        let source = FakeSource::healthy();
        let report = collect(&source, NOW).await.unwrap();
        assert_eq!(report.status.users, 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fetch_failure_becomes_etl_error() {
        let source = FakeSource::failing();
        let body = combined_data(&source, NOW).await;
        assert!(body.starts_with("ETL Error: "), "{body}");
        assert!(body.contains("502"));
        // Pool failed; overview is never requested.
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn combined_data_renders_three_lines() {
        let body = combined_data(&FakeSource::healthy(), NOW).await;
        assert_eq!(body.lines().count(), 3);
        assert!(body.starts_with(r#"{"runtime": "0d 0h 1m 1s", "#));
    }
}
