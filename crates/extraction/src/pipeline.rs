// Copyright 2025 Bench Observatory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-job extraction orchestration.
//!
//! One [`ExtractionPipeline::extract_job`] call turns a job descriptor into
//! its canonical [`JobResult`]: build the envelope, fetch the result bundle
//! once through the retrieval boundary (retries live behind that boundary),
//! then hand the bundle's sections to the specs extractor, the category
//! aggregator and the log extractor. Absent sections leave their part of the
//! result legitimately empty; a retrieval failure is fatal for exactly this
//! job and never publishes a partial result.

use bench_observatory_core::{CategoryKind, JobDescriptor, JobResult};
use bench_observatory_retrieval::ResultFetcher;
use tracing::{debug, info, warn};

use crate::aggregate::aggregate_category;
use crate::logs::{LogExtractor, NoopLogExtractor};
use crate::specs::{PassthroughSpecs, SpecsExtractor};
use crate::Result;

/// Assembles per-job results from the retrieval boundary and the
/// aggregation engine.
pub struct ExtractionPipeline<F> {
    fetcher: F,
    specs: Box<dyn SpecsExtractor>,
    logs: Box<dyn LogExtractor>,
}

impl<F: ResultFetcher> ExtractionPipeline<F> {
    /// Create a pipeline with passthrough specs and no-op log extraction.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            specs: Box::new(PassthroughSpecs),
            logs: Box::new(NoopLogExtractor),
        }
    }

    /// Replace the specs extractor.
    pub fn with_specs_extractor(mut self, specs: Box<dyn SpecsExtractor>) -> Self {
        self.specs = specs;
        self
    }

    /// Replace the log extractor.
    pub fn with_log_extractor(mut self, logs: Box<dyn LogExtractor>) -> Self {
        self.logs = logs;
        self
    }

    /// Extract the canonical result for one job.
    pub async fn extract_job(&self, job: &JobDescriptor) -> Result<JobResult> {
        let mut result = JobResult::from_descriptor(job);

        let bundle = self.fetcher.fetch(&job.ipfs_result).await?;
        let Some(op_state) = bundle.op_states.first() else {
            debug!(job_id = %job.id, "bundle carries no operation states");
            return Ok(result);
        };

        if let Some(results) = &op_state.results {
            if let Some(system_specs) = results.get("system_specs") {
                result.data.specs = self.specs.extract(system_specs);
            }

            for (name, value) in results {
                let Some(kind) = CategoryKind::from_name(name) else {
                    continue;
                };
                let Some(records) = value.as_array() else {
                    warn!(category = %name, "category value is not an array of records");
                    continue;
                };

                let (summary, diagnostics) = aggregate_category(name, kind, records);
                if !diagnostics.is_empty() {
                    debug!(
                        category = %name,
                        dropped = diagnostics.len(),
                        "category had unparseable records"
                    );
                }
                if let Some(summary) = summary {
                    result
                        .data
                        .performance
                        .insert(kind.output_key(name).to_string(), summary);
                }
            }
        }

        if let Some(logs) = &op_state.logs {
            self.logs.extract(logs, &mut result);
        }

        info!(
            job_id = %job.id,
            categories = result.data.performance.len(),
            "job extraction complete"
        );
        Ok(result)
    }

    /// Extract many independent jobs concurrently.
    ///
    /// Failure isolation: each job yields its own result or error, in input
    /// order.
    pub async fn extract_jobs(&self, jobs: &[JobDescriptor]) -> Vec<Result<JobResult>> {
        futures::future::join_all(jobs.iter().map(|job| self.extract_job(job))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractionError;
    use async_trait::async_trait;
    use bench_observatory_core::{CategorySummary, ResultBundle};
    use bench_observatory_retrieval::RetrievalError;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Serves canned bundles by reference; unknown references 404.
    struct StubFetcher {
        bundles: HashMap<String, Value>,
    }

    impl StubFetcher {
        fn new(reference: &str, bundle: Value) -> Self {
            let mut bundles = HashMap::new();
            bundles.insert(reference.to_string(), bundle);
            Self { bundles }
        }
    }

    #[async_trait]
    impl ResultFetcher for StubFetcher {
        async fn fetch(&self, reference: &str) -> bench_observatory_retrieval::Result<ResultBundle> {
            match self.bundles.get(reference) {
                Some(bundle) => Ok(serde_json::from_value(bundle.clone()).unwrap()),
                None => Err(RetrievalError::Status {
                    reference: reference.to_string(),
                    status: 404,
                }),
            }
        }
    }

    fn job(id: &str, reference: &str) -> JobDescriptor {
        JobDescriptor {
            id: id.to_string(),
            node: "node-1".to_string(),
            market: "market-1".to_string(),
            price: "142000000".to_string(),
            time_start: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            time_end: Utc.timestamp_opt(1_700_000_600, 0).unwrap(),
            ipfs_result: reference.to_string(),
        }
    }

    #[tokio::test]
    async fn test_single_run_end_to_end() {
        let bundle = json!({
            "opStates": [{
                "results": {
                    "gemma_results": [
                        "{'total_tokens': 100, 'total_decoding_seconds': 2, 'total_inference_seconds': 3}"
                    ]
                }
            }]
        });
        let pipeline = ExtractionPipeline::new(StubFetcher::new("QmHash", bundle));

        let result = pipeline.extract_job(&job("job-1", "QmHash")).await.unwrap();
        assert_eq!(result.duration, "600");

        match result.data.performance.get("gemma").unwrap() {
            CategorySummary::SingleRun(s) => {
                assert_eq!(s.produced_tokens, 100);
                assert_eq!(s.decoding_seconds, 2.0);
                assert_eq!(s.total_inference_seconds, 3.0);
                assert_eq!(s.tokens_per_second, 50.0);
            }
            other => panic!("unexpected summary: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_test_skips_malformed_record() {
        let bundle = json!({
            "opStates": [{
                "results": {
                    "results_CU_5": [
                        "{'this is': not json",
                        "{'total_tokens_produced': 500, 'total_duration': 10, \
                         'total_requests_made': 5, 'average_latency': 1.5, \
                         'total_input_tokens': 200, 'avg_clock_speed': 1800, \
                         'avg_power_usage': 250, 'avg_utilization': 91.5}"
                    ]
                }
            }]
        });
        let pipeline = ExtractionPipeline::new(StubFetcher::new("QmHash", bundle));

        let result = pipeline.extract_job(&job("job-1", "QmHash")).await.unwrap();
        match result.data.performance.get("results_CU_5").unwrap() {
            CategorySummary::LoadTest(s) => {
                assert_eq!(s.concurrent_users, 5);
                assert_eq!(s.total_tokens_produced, 500);
                assert_eq!(s.average_tokens_per_second, 50.0);
            }
            other => panic!("unexpected summary: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_specs_flow_through_extractor() {
        let bundle = json!({
            "opStates": [{
                "results": {
                    "system_specs": {"cpu": "AMD EPYC 7443", "ram": "512GB"},
                    "gemma_results": []
                }
            }]
        });
        let pipeline = ExtractionPipeline::new(StubFetcher::new("QmHash", bundle));

        let result = pipeline.extract_job(&job("job-1", "QmHash")).await.unwrap();
        assert_eq!(result.data.specs["cpu"], "AMD EPYC 7443");
        // Empty raw sequence: no summary for the category.
        assert!(result.data.performance.is_empty());
    }

    #[tokio::test]
    async fn test_missing_sections_are_not_errors() {
        let cases = [json!({"opStates": []}), json!({"opStates": [{}]})];
        for bundle in cases {
            let pipeline = ExtractionPipeline::new(StubFetcher::new("QmHash", bundle));
            let result = pipeline.extract_job(&job("job-1", "QmHash")).await.unwrap();
            assert!(result.data.performance.is_empty());
            assert_eq!(result.data.specs, json!({}));
            assert_eq!(result.job_id, "job-1");
        }
    }

    #[tokio::test]
    async fn test_retrieval_failure_is_fatal_for_the_job() {
        let pipeline = ExtractionPipeline::new(StubFetcher::new("QmHash", json!({"opStates": []})));
        let err = pipeline
            .extract_job(&job("job-1", "QmUnknown"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Retrieval(_)));
    }

    #[tokio::test]
    async fn test_batch_extraction_isolates_failures() {
        let bundle = json!({
            "opStates": [{
                "results": {
                    "gemma_results": [
                        "{'total_tokens': 10, 'total_decoding_seconds': 1, 'total_inference_seconds': 1}"
                    ]
                }
            }]
        });
        let pipeline = ExtractionPipeline::new(StubFetcher::new("QmHash", bundle));

        let jobs = [job("job-ok", "QmHash"), job("job-bad", "QmUnknown")];
        let results = pipeline.extract_jobs(&jobs).await;
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[tokio::test]
    async fn test_repeated_extraction_is_byte_identical() {
        let bundle = json!({
            "opStates": [{
                "results": {
                    "results_CU_10": [
                        "{'total_tokens_produced': 333, 'total_duration': 7, \
                         'total_requests_made': 3, 'average_latency': 0.7, \
                         'total_input_tokens': 100, 'avg_clock_speed': 1700, \
                         'avg_power_usage': 200, 'avg_utilization': 88, \
                         'model_name': 'qwen-7b', 'Nosana_Price': 0.000142}"
                    ],
                    "gemma_results": ["{'total_tokens': junk"]
                }
            }]
        });
        let pipeline = ExtractionPipeline::new(StubFetcher::new("QmHash", bundle));

        let first = pipeline.extract_job(&job("job-1", "QmHash")).await.unwrap();
        let second = pipeline.extract_job(&job("job-1", "QmHash")).await.unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
