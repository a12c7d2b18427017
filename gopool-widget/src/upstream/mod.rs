//! goPool status API client.
//!
//! Two documents feed the widget: the pool status and the overview. The
//! [`StatusSource`] trait is the seam between fetching them and turning them
//! into a report, so the API can be exercised against test doubles.

mod client;
mod types;

use async_trait::async_trait;

use crate::error::FetchError;

pub use client::UpstreamClient;
pub use types::{BestShare, OverviewStatus, PoolStatus, WorkerStatus};

/// The upstream documents the widget reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum UpstreamEndpoint {
    Pool,
    Overview,
}

/// Source of upstream status documents.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the pool status document.
    async fn pool_status(&self) -> Result<PoolStatus, FetchError>;

    /// Fetch the overview document.
    async fn overview_status(&self) -> Result<OverviewStatus, FetchError>;
}
