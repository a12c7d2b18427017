//! reqwest-backed [`StatusSource`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{OverviewStatus, PoolStatus, StatusSource, UpstreamEndpoint};
use crate::config::UpstreamConfig;
use crate::error::FetchError;
use crate::tracing::prelude::*;

/// HTTP client for the goPool status API.
///
/// Every call is a fresh round-trip; nothing is cached or retried. Requests
/// never go through a proxy, whatever the environment says, since the pool
/// lives on the local network.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    pool_url: String,
    overview_url: String,
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Build a client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .no_proxy();

        if config.insecure_skip_verify {
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }

        let http = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            pool_url: config.pool_url.clone(),
            overview_url: config.overview_url.clone(),
            http,
        })
    }

    /// URL this client uses for `endpoint`.
    pub fn url(&self, endpoint: UpstreamEndpoint) -> &str {
        match endpoint {
            UpstreamEndpoint::Pool => &self.pool_url,
            UpstreamEndpoint::Overview => &self.overview_url,
        }
    }

    /// GET `url` and parse the body as JSON.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "Fetching upstream status");

        let request_failed = |source: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.http.get(url).send().await.map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(request_failed)?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch_endpoint<T: DeserializeOwned>(
        &self,
        endpoint: UpstreamEndpoint,
    ) -> Result<T, FetchError> {
        let result = self.fetch(self.url(endpoint)).await;
        if let Err(e) = &result {
            warn!(%endpoint, error = %e, "Upstream fetch failed");
        }
        result
    }
}

#[async_trait]
impl StatusSource for UpstreamClient {
    async fn pool_status(&self) -> Result<PoolStatus, FetchError> {
        self.fetch_endpoint(UpstreamEndpoint::Pool).await
    }

    async fn overview_status(&self) -> Result<OverviewStatus, FetchError> {
        self.fetch_endpoint(UpstreamEndpoint::Overview).await
    }
}
