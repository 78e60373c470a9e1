// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Job descriptor input and `JobResult` output envelope.
//!
//! A [`JobDescriptor`] identifies one benchmark job as posted on the compute
//! market, together with the opaque content reference under which the job
//! uploaded its result bundle. A [`JobResult`] is the canonical summary the
//! extraction pipeline produces for that job.
//!
//! Identifier-like fields (`node`, `market`, `price`) are carried as their
//! exact textual representations end to end; `price` in particular is a
//! decimal amount that must never round-trip through a float.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::summary::CategorySummary;

/// Descriptor of one benchmark job whose telemetry is to be summarized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptor {
    /// Opaque job identifier.
    pub id: String,
    /// Identifier of the node that executed the job.
    pub node: String,
    /// Identifier of the market the job was posted on.
    pub market: String,
    /// Job price as an exact decimal string.
    pub price: String,
    /// Instant the job started.
    pub time_start: DateTime<Utc>,
    /// Instant the job ended.
    pub time_end: DateTime<Utc>,
    /// Opaque content reference under which the result bundle was stored.
    pub ipfs_result: String,
}

impl JobDescriptor {
    /// Wall-clock duration of the job (`time_end - time_start`).
    pub fn duration(&self) -> chrono::Duration {
        self.time_end.signed_duration_since(self.time_start)
    }
}

/// Extracted data sections of a [`JobResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobData {
    /// System specification section, populated by the external specs
    /// extractor. Opaque to the aggregation engine.
    pub specs: serde_json::Value,
    /// Per-category performance summaries, keyed by output category key.
    ///
    /// Ordered map: aggregating the same bundle twice serializes
    /// byte-identically.
    pub performance: BTreeMap<String, CategorySummary>,
}

impl Default for JobData {
    fn default() -> Self {
        Self {
            specs: serde_json::Value::Object(serde_json::Map::new()),
            performance: BTreeMap::new(),
        }
    }
}

/// Canonical per-job summary produced by the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    /// Opaque job identifier.
    pub job_id: String,
    /// Node identifier, decimal-rendered.
    pub node: String,
    /// Market identifier, decimal-rendered.
    pub market: String,
    /// Job price, decimal-rendered.
    pub price: String,
    /// Job duration in whole seconds, decimal-rendered.
    pub duration: String,
    /// Extracted specs and performance sections.
    pub data: JobData,
}

impl JobResult {
    /// Build the result envelope for a job, with empty data sections.
    pub fn from_descriptor(job: &JobDescriptor) -> Self {
        Self {
            job_id: job.id.clone(),
            node: job.node.clone(),
            market: job.market.clone(),
            price: job.price.clone(),
            duration: job.duration().num_seconds().to_string(),
            data: JobData::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn descriptor() -> JobDescriptor {
        JobDescriptor {
            id: "job-1".to_string(),
            node: "97G9NnvBDQ2WpKu6fasoMsAKmfj63C9rhysJnkeWodAf".to_string(),
            market: "Crop49jpc7prcgAcS82WbWyGHwbN5GgDym3uFbxxCTZg".to_string(),
            price: "142000000".to_string(),
            time_start: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            time_end: Utc.timestamp_opt(1_700_000_930, 0).unwrap(),
            ipfs_result: "QmResultHash".to_string(),
        }
    }

    #[test]
    fn test_envelope_from_descriptor() {
        let result = JobResult::from_descriptor(&descriptor());
        assert_eq!(result.job_id, "job-1");
        assert_eq!(result.price, "142000000");
        assert_eq!(result.duration, "930");
        assert!(result.data.performance.is_empty());
        assert_eq!(result.data.specs, serde_json::json!({}));
    }

    #[test]
    fn test_descriptor_accepts_camel_case_wire_names() {
        let job: JobDescriptor = serde_json::from_value(serde_json::json!({
            "id": "job-2",
            "node": "node-a",
            "market": "market-a",
            "price": "1",
            "timeStart": "2024-10-01T12:00:00Z",
            "timeEnd": "2024-10-01T12:15:00Z",
            "ipfsResult": "QmOther"
        }))
        .unwrap();
        assert_eq!(job.duration().num_seconds(), 900);
        assert_eq!(job.ipfs_result, "QmOther");
    }

    #[test]
    fn test_result_serializes_flat_envelope_keys() {
        let json = serde_json::to_value(JobResult::from_descriptor(&descriptor())).unwrap();
        for key in ["job_id", "node", "market", "price", "duration", "data"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(json["data"]["specs"], serde_json::json!({}));
        assert_eq!(json["data"]["performance"], serde_json::json!({}));
    }
}
