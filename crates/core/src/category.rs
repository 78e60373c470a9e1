// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Category name decoding.
//!
//! A result bundle groups its raw records under named categories. The name
//! alone determines how a category is aggregated: fixed-model single-run
//! benchmarks are named `<model>_results`, load tests encode their
//! concurrency level as `results_CU_<n>`. The kind is decoded once per
//! category and never mixed within one.

/// Category names carrying single-run benchmark records, one per known model.
pub const SINGLE_RUN_CATEGORIES: &[&str] = &[
    "gemma_results",
    "phi3_results",
    "mistral_results",
    "llama3_results",
    "qwen_results",
    "llama3_70b_results",
];

/// Suffix stripped from single-run category names to form the output key.
const SINGLE_RUN_SUFFIX: &str = "_results";

/// Prefix of load-test category names; the remainder is the concurrency level.
const LOAD_TEST_PREFIX: &str = "results_CU_";

/// How the records of one category are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    /// Single-shot inference runs for one fixed model.
    SingleRun,
    /// Load test at a fixed concurrency level.
    LoadTest {
        /// Number of concurrent users the load test ran with.
        concurrent_users: u32,
    },
}

impl CategoryKind {
    /// Decode a category name into its kind.
    ///
    /// Returns `None` for names that are not aggregatable categories
    /// (for example `system_specs`, or an unknown model name).
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(level) = name.strip_prefix(LOAD_TEST_PREFIX) {
            return level
                .parse::<u32>()
                .ok()
                .map(|concurrent_users| Self::LoadTest { concurrent_users });
        }
        if SINGLE_RUN_CATEGORIES.contains(&name) {
            return Some(Self::SingleRun);
        }
        None
    }

    /// The key under which this category's summary is stored in the output
    /// mapping.
    ///
    /// Single-run categories drop their `_results` suffix
    /// (`"gemma_results"` becomes `"gemma"`); load-test names already encode
    /// their concurrency level and pass through unchanged.
    pub fn output_key<'a>(&self, name: &'a str) -> &'a str {
        match self {
            Self::SingleRun => name.strip_suffix(SINGLE_RUN_SUFFIX).unwrap_or(name),
            Self::LoadTest { .. } => name,
        }
    }
}
