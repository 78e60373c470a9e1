//! Markdown report generation for extracted job results.

use bench_observatory_core::JobResult;
use std::fmt::Write;

/// Generate a markdown summary table from extracted job results.
pub fn generate_summary(results: &[JobResult]) -> String {
    let mut output = String::new();

    writeln!(output, "# Extraction Summary").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "## Jobs").unwrap();
    writeln!(output).unwrap();
    writeln!(
        output,
        "| Job | Node | Market | Duration (s) | Categories |"
    )
    .unwrap();
    writeln!(
        output,
        "|-----|------|--------|--------------|------------|"
    )
    .unwrap();

    for result in results {
        writeln!(
            output,
            "| {} | {} | {} | {} | {} |",
            result.job_id,
            result.node,
            result.market,
            result.duration,
            result.data.performance.len()
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "---").unwrap();
    writeln!(output, "Total jobs: {}", results.len()).unwrap();

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_observatory_core::JobData;

    #[test]
    fn test_summary_lists_one_row_per_job() {
        let results = vec![
            JobResult {
                job_id: "job-a".to_string(),
                node: "node-1".to_string(),
                market: "market-1".to_string(),
                price: "1".to_string(),
                duration: "600".to_string(),
                data: JobData::default(),
            },
            JobResult {
                job_id: "job-b".to_string(),
                node: "node-2".to_string(),
                market: "market-1".to_string(),
                price: "2".to_string(),
                duration: "900".to_string(),
                data: JobData::default(),
            },
        ];

        let summary = generate_summary(&results);
        assert!(summary.contains("| job-a | node-1 |"));
        assert!(summary.contains("| job-b | node-2 |"));
        assert!(summary.contains("Total jobs: 2"));
    }
}
