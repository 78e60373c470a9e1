// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Raw result-bundle wire types.
//!
//! The bundle is the unmodified document a benchmark job uploaded: a list of
//! operation states, each optionally carrying a `results` section (category
//! name to raw records) and a `logs` section. The format is dictated by the
//! existing producers and must be preserved for backward compatibility.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One job's uploaded result bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBundle {
    /// Recorded operation states, in execution order.
    #[serde(default)]
    pub op_states: Vec<OpState>,
}

/// One stage of a job's recorded execution.
///
/// Producers attach further fields (operator ids, exit codes); only the two
/// sections the extraction pipeline consumes are modeled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpState {
    /// Benchmark results section: category name to raw value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Map<String, Value>>,
    /// Raw log section, consumed by the external log extractor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Value>,
}
