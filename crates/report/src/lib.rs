//! Output sink for extracted job results.
//!
//! This crate writes the artifacts downstream analysis tooling consumes:
//! per-job raw JSON files, a combined JSON document keyed by job id, and a
//! markdown summary table.
//!
//! # Modules
//!
//! - [`io`] - Reading and writing result files
//! - [`markdown`] - Markdown report generation

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod io;
pub mod markdown;

use thiserror::Error;

/// Errors that can occur while writing or reading result artifacts.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
