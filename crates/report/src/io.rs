//! I/O operations for extracted job results.
//!
//! The combined file is a single JSON object keyed by job id, the shape the
//! downstream statistics and leaderboard tooling loads.

use crate::markdown;
use crate::Result;
use bench_observatory_core::JobResult;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Subdirectory holding one raw JSON file per job.
pub const RAW_SUBDIR: &str = "raw";

/// File name of the combined results document.
pub const COMBINED_FILE: &str = "all_results.json";

/// File name of the markdown summary.
pub const SUMMARY_FILE: &str = "summary.md";

/// Ensure the output directory layout exists under `out`.
pub fn ensure_output_dirs(out: &Path) -> Result<()> {
    fs::create_dir_all(out.join(RAW_SUBDIR))?;
    Ok(())
}

/// Render the combined document: one JSON object keyed by job id.
pub fn combined_json(results: &[JobResult]) -> Result<String> {
    let by_id: BTreeMap<&str, &JobResult> = results
        .iter()
        .map(|result| (result.job_id.as_str(), result))
        .collect();
    Ok(serde_json::to_string_pretty(&by_id)?)
}

/// Write one job's result to the raw directory.
pub fn write_job_result(out: &Path, result: &JobResult) -> Result<()> {
    ensure_output_dirs(out)?;
    let file = out
        .join(RAW_SUBDIR)
        .join(format!("{}.json", result.job_id.replace('/', "_")));
    fs::write(file, serde_json::to_string_pretty(result)?)?;
    Ok(())
}

/// Write the combined results document under `out`.
pub fn write_combined(out: &Path, results: &[JobResult]) -> Result<()> {
    ensure_output_dirs(out)?;
    fs::write(out.join(COMBINED_FILE), combined_json(results)?)?;
    Ok(())
}

/// Write the markdown summary under `out`.
pub fn write_summary(out: &Path, results: &[JobResult]) -> Result<()> {
    ensure_output_dirs(out)?;
    fs::write(out.join(SUMMARY_FILE), markdown::generate_summary(results))?;
    Ok(())
}

/// Write all result artifacts (raw files, combined document, summary).
pub fn write_all_outputs(out: &Path, results: &[JobResult]) -> Result<()> {
    ensure_output_dirs(out)?;
    for result in results {
        write_job_result(out, result)?;
    }
    write_combined(out, results)?;
    write_summary(out, results)?;
    Ok(())
}

/// Read a previously written combined results document.
pub fn read_combined(path: impl AsRef<Path>) -> Result<Vec<JobResult>> {
    let content = fs::read_to_string(path)?;
    let by_id: BTreeMap<String, JobResult> = serde_json::from_str(&content)?;
    Ok(by_id.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_observatory_core::JobData;

    fn result(id: &str) -> JobResult {
        JobResult {
            job_id: id.to_string(),
            node: "node-1".to_string(),
            market: "market-1".to_string(),
            price: "142000000".to_string(),
            duration: "600".to_string(),
            data: JobData::default(),
        }
    }

    #[test]
    fn test_combined_document_is_keyed_by_job_id() {
        let json = combined_json(&[result("job-a"), result("job-b")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["job-a"]["duration"], "600");
        assert_eq!(value["job-b"]["node"], "node-1");
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let results = vec![result("job-a"), result("job-b")];

        write_all_outputs(dir.path(), &results).unwrap();

        assert!(dir.path().join(RAW_SUBDIR).join("job-a.json").exists());
        assert!(dir.path().join(SUMMARY_FILE).exists());

        let read_back = read_combined(dir.path().join(COMBINED_FILE)).unwrap();
        assert_eq!(read_back.len(), 2);
        assert!(read_back.iter().any(|r| r.job_id == "job-b"));
    }

    #[test]
    fn test_job_id_slashes_do_not_escape_raw_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_job_result(dir.path(), &result("jobs/42")).unwrap();
        assert!(dir.path().join(RAW_SUBDIR).join("jobs_42.json").exists());
    }
}
