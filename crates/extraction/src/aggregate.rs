// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Category aggregator.
//!
//! A pure, order-independent fold over one category's raw records. Records
//! are sanitized and parsed individually; failures become diagnostics and
//! the fold continues over whatever parsed. The diagnostic channel is
//! returned alongside the summary, never interleaved with it, so aggregating
//! the same input twice yields byte-identical output.

use bench_observatory_core::summary::round2;
use bench_observatory_core::{CategoryKind, CategorySummary, LoadTestSummary, SingleRunSummary};
use serde_json::Value;
use tracing::warn;

use crate::parse::{parse_record, LoadTestRecord, ParseFailure, ParsedRecord};
use crate::sanitize::sanitize_record;

/// Aggregate one category's raw records into a summary.
///
/// Returns `(None, [])` for an empty record sequence; otherwise a summary
/// computed over exactly the successfully parsed records, plus one
/// [`ParseFailure`] per record that was dropped.
pub fn aggregate_category(
    name: &str,
    kind: CategoryKind,
    records: &[Value],
) -> (Option<CategorySummary>, Vec<ParseFailure>) {
    if records.is_empty() {
        return (None, Vec::new());
    }

    let mut parsed = Vec::with_capacity(records.len());
    let mut failures = Vec::new();

    for record in records {
        let outcome = match record.as_str() {
            Some(raw) => parse_record(name, kind, &sanitize_record(raw)),
            None => Err(ParseFailure {
                category: name.to_string(),
                cause: "record is not a text value".to_string(),
            }),
        };
        match outcome {
            Ok(record) => parsed.push(record),
            Err(failure) => {
                warn!(category = name, cause = %failure.cause, "dropping unparseable record");
                failures.push(failure);
            }
        }
    }

    let summary = match kind {
        CategoryKind::SingleRun => single_run_summary(&parsed),
        CategoryKind::LoadTest { concurrent_users } => {
            load_test_summary(concurrent_users, &parsed)
        }
    };
    (Some(summary), failures)
}

fn single_run_summary(parsed: &[ParsedRecord]) -> CategorySummary {
    let mut total_tokens = 0i64;
    let mut decoding_seconds = 0.0f64;
    let mut inference_seconds = 0.0f64;

    for record in parsed {
        if let ParsedRecord::SingleRun(r) = record {
            total_tokens += r.total_tokens;
            decoding_seconds += r.total_decoding_seconds;
            inference_seconds += r.total_inference_seconds;
        }
    }

    CategorySummary::SingleRun(SingleRunSummary {
        total_inference_seconds: round2(inference_seconds),
        produced_tokens: total_tokens,
        decoding_seconds: round2(decoding_seconds),
        tokens_per_second: round2(ratio(total_tokens as f64, decoding_seconds)),
    })
}

fn load_test_summary(concurrent_users: u32, parsed: &[ParsedRecord]) -> CategorySummary {
    let records: Vec<&LoadTestRecord> = parsed
        .iter()
        .filter_map(|record| match record {
            ParsedRecord::LoadTest(r) => Some(r),
            _ => None,
        })
        .collect();
    let count = records.len();

    let mut total_tokens_produced = 0i64;
    let mut total_duration = 0.0f64;
    let mut total_requests_made = 0i64;
    let mut total_input_tokens = 0i64;
    let mut latency_sum = 0.0f64;
    let mut clock_speed_sum = 0.0f64;
    let mut power_usage_sum = 0.0f64;
    let mut utilization_sum = 0.0f64;

    for r in &records {
        total_tokens_produced += r.total_tokens_produced;
        total_duration += r.total_duration;
        total_requests_made += r.total_requests_made;
        total_input_tokens += r.total_input_tokens;
        latency_sum += r.average_latency;
        clock_speed_sum += r.avg_clock_speed;
        power_usage_sum += r.avg_power_usage;
        utilization_sum += r.avg_utilization;
    }

    let model_name = records
        .iter()
        .find_map(|r| r.model_name.as_ref().filter(|s| !s.is_empty()).cloned());
    // Assumed constant per category; the last record wins, unvalidated.
    let price = records.iter().rev().find_map(|r| r.price.clone());

    CategorySummary::LoadTest(LoadTestSummary {
        total_duration: round2(total_duration),
        total_tokens_produced,
        total_requests_made,
        average_tokens_per_second: round2(ratio(total_tokens_produced as f64, total_duration)),
        average_latency: round2(mean(latency_sum, count)),
        concurrent_users,
        model_name,
        total_input_tokens,
        price,
        avg_clock_speed: round2(mean(clock_speed_sum, count)),
        avg_power_usage: round2(mean(power_usage_sum, count)),
        avg_utilization: round2(mean(utilization_sum, count)),
    })
}

/// Ratio with a defined `0` for a zero denominator.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Mean with a defined `0` for an empty population.
fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
