// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! System-specification extraction seam.
//!
//! The specs extractor is an external collaborator: the pipeline hands it
//! the raw `system_specs` section and stores whatever it returns, opaquely,
//! under `data.specs`.

use serde_json::Value;

/// Converts the raw `system_specs` section into the result's specs value.
pub trait SpecsExtractor: Send + Sync {
    /// Extract the specs value to store on the job result.
    fn extract(&self, system_specs: &Value) -> Value;
}

/// Default extractor: adopts the section unchanged.
pub struct PassthroughSpecs;

impl SpecsExtractor for PassthroughSpecs {
    fn extract(&self, system_specs: &Value) -> Value {
        system_specs.clone()
    }
}
