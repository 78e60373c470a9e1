// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Aggregated category summaries and the numeric output policy.
//!
//! Every floating-point value stored in a summary is rounded to 2 decimal
//! places, half away from zero. Derived ratios with a zero denominator are
//! the sentinel `0`, never NaN or infinity.

use serde::{Deserialize, Serialize};

/// Round a value to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Collapse -0.0 so equal aggregations serialize identically.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Summary of a single-run benchmark category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleRunSummary {
    /// Summed inference wall time in seconds.
    pub total_inference_seconds: f64,
    /// Summed produced-token count.
    pub produced_tokens: i64,
    /// Summed decoding time in seconds.
    pub decoding_seconds: f64,
    /// Produced tokens divided by decoding seconds.
    pub tokens_per_second: f64,
}

/// Summary of a load-test category at one concurrency level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadTestSummary {
    /// Summed test duration in seconds.
    pub total_duration: f64,
    /// Summed produced-token count.
    pub total_tokens_produced: i64,
    /// Summed request count.
    pub total_requests_made: i64,
    /// Total tokens produced divided by total duration.
    pub average_tokens_per_second: f64,
    /// Mean per-record latency.
    pub average_latency: f64,
    /// Concurrency level the test ran at, decoded from the category name.
    pub concurrent_users: u32,
    /// Model under test, first non-empty value reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// Summed input-token count.
    pub total_input_tokens: i64,
    /// Reported token price, last value encountered. Assumed constant across
    /// the category's records; not validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<serde_json::Number>,
    /// Mean GPU clock speed.
    pub avg_clock_speed: f64,
    /// Mean GPU power usage.
    pub avg_power_usage: f64,
    /// Mean GPU utilization.
    pub avg_utilization: f64,
}

/// The aggregated result for one category, shaped by its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategorySummary {
    /// Summary of a single-run category.
    SingleRun(SingleRunSummary),
    /// Summary of a load-test category.
    LoadTest(LoadTestSummary),
}
