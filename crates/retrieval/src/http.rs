// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Gateway-backed result fetcher.

use async_trait::async_trait;
use bench_observatory_core::ResultBundle;
use std::time::Duration;
use tracing::debug;

use crate::{ResultFetcher, Result, RetrievalError};

/// Default public gateway for resolving content references.
pub const DEFAULT_GATEWAY: &str = "https://nosana.mypinata.cloud/ipfs";

/// Default timeout for gateway requests (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches result bundles from a content-addressed storage gateway over HTTP.
pub struct HttpResultFetcher {
    client: reqwest::Client,
    gateway: String,
}

impl HttpResultFetcher {
    /// Create a fetcher resolving references against `gateway`.
    pub fn new(gateway: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            gateway: gateway.into(),
        })
    }

    /// Create a fetcher using [`DEFAULT_GATEWAY`].
    pub fn with_default_gateway() -> Result<Self> {
        Self::new(DEFAULT_GATEWAY)
    }

    fn bundle_url(&self, reference: &str) -> String {
        format!("{}/{}", self.gateway.trim_end_matches('/'), reference)
    }
}

#[async_trait]
impl ResultFetcher for HttpResultFetcher {
    async fn fetch(&self, reference: &str) -> Result<ResultBundle> {
        let url = self.bundle_url(reference);
        debug!(%url, "fetching result bundle");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(RetrievalError::Status {
                reference: reference.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_url_joins_reference() {
        let fetcher = HttpResultFetcher::new("https://gateway.example/ipfs").unwrap();
        assert_eq!(
            fetcher.bundle_url("QmHash"),
            "https://gateway.example/ipfs/QmHash"
        );
    }

    #[test]
    fn test_bundle_url_tolerates_trailing_slash() {
        let fetcher = HttpResultFetcher::new("https://gateway.example/ipfs/").unwrap();
        assert_eq!(
            fetcher.bundle_url("QmHash"),
            "https://gateway.example/ipfs/QmHash"
        );
    }
}
