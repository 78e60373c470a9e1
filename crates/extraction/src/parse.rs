// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Record parser.
//!
//! Turns one sanitized record into the typed fields its category kind
//! expects. Every expected numeric field must be present and convertible;
//! a missing field, a non-numeric or non-finite value, or a structurally
//! invalid document rejects the whole record. A rejected record is excluded
//! from aggregation entirely rather than injecting an invalid value into
//! the running totals.

use bench_observatory_core::CategoryKind;
use serde_json::Value;
use thiserror::Error;

/// A record that could not be brought into typed form.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("record in category '{category}' dropped: {cause}")]
pub struct ParseFailure {
    /// Name of the category the record belonged to.
    pub category: String,
    /// Human-readable cause.
    pub cause: String,
}

/// Typed fields of one successfully parsed record.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRecord {
    /// A single-run benchmark record.
    SingleRun(SingleRunRecord),
    /// A load-test record.
    LoadTest(LoadTestRecord),
}

/// Fields reported by a single-shot inference run.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRunRecord {
    pub total_tokens: i64,
    pub total_decoding_seconds: f64,
    pub total_inference_seconds: f64,
}

/// Fields reported by one load-test run at a fixed concurrency level.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTestRecord {
    pub total_tokens_produced: i64,
    pub total_duration: f64,
    pub total_requests_made: i64,
    pub average_latency: f64,
    pub total_input_tokens: i64,
    pub avg_clock_speed: f64,
    pub avg_power_usage: f64,
    pub avg_utilization: f64,
    /// Optional; omitted from the record's contribution when absent.
    pub model_name: Option<String>,
    /// Optional token price, preserved without a float round-trip.
    pub price: Option<serde_json::Number>,
}

/// Parse one sanitized record under the category's kind.
pub fn parse_record(
    category: &str,
    kind: CategoryKind,
    sanitized: &str,
) -> Result<ParsedRecord, ParseFailure> {
    let fail = |cause: String| ParseFailure {
        category: category.to_string(),
        cause,
    };

    let doc: Value = serde_json::from_str(sanitized)
        .map_err(|e| fail(format!("invalid record structure: {e}")))?;

    match kind {
        CategoryKind::SingleRun => Ok(ParsedRecord::SingleRun(SingleRunRecord {
            total_tokens: int_field(&doc, "total_tokens").map_err(&fail)?,
            total_decoding_seconds: float_field(&doc, "total_decoding_seconds").map_err(&fail)?,
            total_inference_seconds: float_field(&doc, "total_inference_seconds").map_err(&fail)?,
        })),
        CategoryKind::LoadTest { .. } => Ok(ParsedRecord::LoadTest(LoadTestRecord {
            total_tokens_produced: int_field(&doc, "total_tokens_produced").map_err(&fail)?,
            total_duration: float_field(&doc, "total_duration").map_err(&fail)?,
            total_requests_made: int_field(&doc, "total_requests_made").map_err(&fail)?,
            average_latency: float_field(&doc, "average_latency").map_err(&fail)?,
            total_input_tokens: int_field(&doc, "total_input_tokens").map_err(&fail)?,
            avg_clock_speed: float_field(&doc, "avg_clock_speed").map_err(&fail)?,
            avg_power_usage: float_field(&doc, "avg_power_usage").map_err(&fail)?,
            avg_utilization: float_field(&doc, "avg_utilization").map_err(&fail)?,
            model_name: text_field(&doc, "model_name"),
            price: number_field(&doc, "Nosana_Price"),
        })),
    }
}

/// Required integer field. Numeric strings are accepted; fractional values
/// truncate toward zero, matching the producers' integer coercion.
fn int_field(doc: &Value, name: &str) -> Result<i64, String> {
    match doc.get(name) {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
                    .ok_or_else(|| format!("field '{name}' is out of integer range"))
            }
        }
        Some(Value::String(s)) => {
            let text = s.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
                .ok_or_else(|| format!("field '{name}' is not numeric: '{s}'"))
        }
        Some(Value::Null) | None => Err(format!("missing numeric field '{name}'")),
        Some(_) => Err(format!("field '{name}' has a non-numeric type")),
    }
}

/// Required floating-point field. Numeric strings are accepted; non-finite
/// values are rejected so NaN can never reach the totals.
fn float_field(doc: &Value, name: &str) -> Result<f64, String> {
    match doc.get(name) {
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .ok_or_else(|| format!("field '{name}' is not a finite number")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| format!("field '{name}' is not numeric: '{s}'")),
        Some(Value::Null) | None => Err(format!("missing numeric field '{name}'")),
        Some(_) => Err(format!("field '{name}' has a non-numeric type")),
    }
}

fn text_field(doc: &Value, name: &str) -> Option<String> {
    doc.get(name).and_then(Value::as_str).map(str::to_string)
}

fn number_field(doc: &Value, name: &str) -> Option<serde_json::Number> {
    match doc.get(name) {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}
