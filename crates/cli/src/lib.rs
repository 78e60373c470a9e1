//! CLI for Bench Observatory.
//!
//! This crate provides the command-line interface for Bench Observatory:
//! the `extract` subcommand that turns job descriptors into canonical
//! per-job results, and the `summarize` subcommand that regenerates the
//! markdown summary from a previously written combined results file.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::Context;
use bench_observatory_core::{JobDescriptor, JobResult};
use bench_observatory_extraction::ExtractionPipeline;
use bench_observatory_retrieval::{
    FileResultFetcher, HttpResultFetcher, ResultFetcher, RetryingFetcher,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::error;

/// Bench Observatory CLI.
#[derive(Parser, Debug)]
#[command(name = "bench-observatory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract canonical job results from uploaded result bundles.
    ///
    /// Reads one job descriptor (or an array of descriptors) from a JSON
    /// file, fetches each job's result bundle, and writes the aggregated
    /// results either to an output directory or to stdout.
    Extract {
        /// Path to a job descriptor JSON file (one descriptor or an array).
        #[arg(long)]
        jobs: PathBuf,

        /// Gateway base URL for resolving content references.
        #[arg(long, env = "BENCH_OBSERVATORY_GATEWAY")]
        gateway: Option<String>,

        /// Directory of saved bundles; replay offline instead of fetching.
        #[arg(long, conflicts_with = "gateway")]
        bundles: Option<PathBuf>,

        /// Output directory; the combined document prints to stdout when
        /// omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Regenerate the markdown summary from a combined results file.
    Summarize {
        /// Path to a combined results JSON file.
        #[arg(long)]
        input: PathBuf,

        /// File to write; prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI with the given arguments.
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract {
            jobs,
            gateway,
            bundles,
            output,
        } => extract(&jobs, gateway, bundles, output).await,
        Commands::Summarize { input, output } => summarize(&input, output),
    }
}

async fn extract(
    jobs: &Path,
    gateway: Option<String>,
    bundles: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let descriptors = read_descriptors(jobs)?;

    let results = match bundles {
        Some(dir) => {
            let pipeline = ExtractionPipeline::new(FileResultFetcher::new(dir));
            run_pipeline(&pipeline, &descriptors).await
        }
        None => {
            let fetcher = match gateway {
                Some(url) => HttpResultFetcher::new(url),
                None => HttpResultFetcher::with_default_gateway(),
            }?;
            let pipeline = ExtractionPipeline::new(RetryingFetcher::new(fetcher));
            run_pipeline(&pipeline, &descriptors).await
        }
    };

    if results.is_empty() && !descriptors.is_empty() {
        anyhow::bail!("all {} jobs failed extraction", descriptors.len());
    }

    match output {
        Some(dir) => {
            bench_observatory_report::io::write_all_outputs(&dir, &results)?;
            println!(
                "Extracted {}/{} jobs, results written to {}",
                results.len(),
                descriptors.len(),
                dir.display()
            );
        }
        None => {
            println!("{}", bench_observatory_report::io::combined_json(&results)?);
        }
    }
    Ok(())
}

async fn run_pipeline<F: ResultFetcher>(
    pipeline: &ExtractionPipeline<F>,
    descriptors: &[JobDescriptor],
) -> Vec<JobResult> {
    pipeline
        .extract_jobs(descriptors)
        .await
        .into_iter()
        .zip(descriptors)
        .filter_map(|(outcome, job)| match outcome {
            Ok(result) => Some(result),
            Err(e) => {
                error!(job_id = %job.id, error = %e, "job extraction failed");
                None
            }
        })
        .collect()
}

fn summarize(input: &Path, output: Option<PathBuf>) -> anyhow::Result<()> {
    let results = bench_observatory_report::io::read_combined(input)
        .with_context(|| format!("failed to load {}", input.display()))?;
    let summary = bench_observatory_report::markdown::generate_summary(&results);

    match output {
        Some(file) => {
            std::fs::write(&file, summary)
                .with_context(|| format!("failed to write {}", file.display()))?;
            println!("Summary of {} jobs written to {}", results.len(), file.display());
        }
        None => print!("{summary}"),
    }
    Ok(())
}

/// Read one descriptor or an array of descriptors from a JSON file.
fn read_descriptors(path: &Path) -> anyhow::Result<Vec<JobDescriptor>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let descriptors = if doc.is_array() {
        serde_json::from_value(doc)?
    } else {
        vec![serde_json::from_value(doc)?]
    };
    Ok(descriptors)
}
