// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Log-based auxiliary-field extraction seam.
//!
//! The log extractor is an external collaborator: after the results section
//! has been aggregated, the pipeline hands it the raw `logs` section so it
//! can populate any remaining auxiliary fields of the job result.

use bench_observatory_core::JobResult;
use serde_json::Value;

/// Populates auxiliary fields of a [`JobResult`] from the raw log section.
pub trait LogExtractor: Send + Sync {
    /// Inspect `logs` and amend `result` in place.
    fn extract(&self, logs: &Value, result: &mut JobResult);
}

/// Default extractor: leaves the result untouched.
pub struct NoopLogExtractor;

impl LogExtractor for NoopLogExtractor {
    fn extract(&self, _logs: &Value, _result: &mut JobResult) {}
}
