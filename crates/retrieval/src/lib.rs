// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Retry-protected retrieval boundary for result bundles.
//!
//! Benchmark jobs upload their result bundles to content-addressed storage;
//! this crate fetches them back. The [`ResultFetcher`] trait is the single
//! seam the extraction pipeline depends on, with three implementations:
//!
//! - [`HttpResultFetcher`] - resolves references through a public gateway
//! - [`FileResultFetcher`] - replays bundles saved on local disk
//! - [`RetryingFetcher`] - decorates any fetcher with bounded retries and
//!   exponential backoff
//!
//! Retries live entirely on this side of the boundary; callers issue one
//! fetch per job and treat [`RetrievalError::RetriesExhausted`] as fatal for
//! that job alone.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod file;
pub mod http;
pub mod retry;

pub use file::FileResultFetcher;
pub use http::HttpResultFetcher;
pub use retry::{RetryPolicy, RetryingFetcher};

use async_trait::async_trait;
use bench_observatory_core::ResultBundle;
use thiserror::Error;

/// Errors that can occur while retrieving a result bundle.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Transport-level failure talking to the gateway.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("gateway returned HTTP {status} for '{reference}'")]
    Status {
        /// Content reference that was requested.
        reference: String,
        /// HTTP status code received.
        status: u16,
    },

    /// The bundle body was not valid JSON of the expected shape.
    #[error("result bundle could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// A locally stored bundle could not be read.
    #[error("failed to read bundle '{reference}': {source}")]
    Io {
        /// Content reference that was requested.
        reference: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The retry budget was spent without a successful fetch.
    #[error("retries exhausted after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Rendered form of the final attempt's error.
        last_error: String,
    },
}

/// Result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Source of result bundles, keyed by opaque content reference.
#[async_trait]
pub trait ResultFetcher: Send + Sync {
    /// Fetch the bundle stored under `reference`.
    async fn fetch(&self, reference: &str) -> Result<ResultBundle>;
}
