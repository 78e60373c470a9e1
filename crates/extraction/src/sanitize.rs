// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Record sanitizer.
//!
//! Benchmark containers emit their per-run records in a relaxed encoding:
//! single-quoted keys and values, and the bare token `NaN` where a
//! measurement was unavailable. This module rewrites one raw record into
//! strictly parseable JSON text; it performs no semantic validation, so
//! whatever remains malformed is left for the parser to reject.

use once_cell::sync::Lazy;
use regex::Regex;

// Word-bounded so identifiers merely containing "NaN" survive.
static BARE_NAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bNaN\b").expect("valid literal regex"));

/// Rewrite one raw record into canonical JSON text.
///
/// Single quotes become double quotes, and every bare `NaN` token becomes
/// `null`.
pub fn sanitize_record(raw: &str) -> String {
    let double_quoted = raw.replace('\'', "\"");
    BARE_NAN.replace_all(&double_quoted, "null").into_owned()
}
