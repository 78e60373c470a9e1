// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Record sanitization, parsing and aggregation engine.
//!
//! This crate converts the noisy textual records inside a job's result
//! bundle into typed numeric summaries:
//!
//! - [`sanitize`] - relaxed producer encoding to strict JSON text
//! - [`parse`] - sanitized text to typed records, or a [`ParseFailure`]
//! - [`aggregate`] - pure per-category fold producing a summary plus a
//!   structured diagnostic channel
//! - [`pipeline`] - per-job orchestration over the retrieval boundary and
//!   the external specs/log extractor seams ([`specs`], [`logs`])
//!
//! A job either yields a complete [`bench_observatory_core::JobResult`]
//! (with any section legitimately empty) or fails outright with a retrieval
//! error. Record-level malformations are visible only through diagnostics
//! and logging, never through corrupted numeric output.

#![deny(unsafe_code)]

pub mod aggregate;
pub mod logs;
pub mod parse;
pub mod pipeline;
pub mod sanitize;
pub mod specs;

pub use aggregate::aggregate_category;
pub use logs::{LogExtractor, NoopLogExtractor};
pub use parse::{ParseFailure, ParsedRecord};
pub use pipeline::ExtractionPipeline;
pub use sanitize::sanitize_record;
pub use specs::{PassthroughSpecs, SpecsExtractor};

use bench_observatory_retrieval::RetrievalError;
use thiserror::Error;

/// Errors that abort the extraction of one job.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The retrieval boundary gave up on the job's result bundle.
    #[error("result retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
