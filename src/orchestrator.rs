//! Analysis orchestrator.
//!
//! This module coordinates a full analysis run: discovering the log files,
//! parsing them, aggregating the valid records and writing the reports.
//! Nothing is written until the whole batch has been processed.

use crate::analysis::{self, AnalysisMetadata, AnalysisReport, ParsedRecord, SkippedFile};
use crate::config::AnalyzerConfig;
use crate::utils::discovery::discover_logs;
use color_eyre::eyre::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

/// In-memory result of a run, before anything is written
#[derive(Debug)]
pub struct AnalysisRun {
    pub report: AnalysisReport,
    pub skipped: Vec<SkippedFile>,
}

impl AnalysisRun {
    pub fn records(&self) -> &[ParsedRecord] {
        &self.report.records
    }
}

/// Files produced by [`write_outputs`]
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub csv: PathBuf,
    pub report: PathBuf,
    pub json: Option<PathBuf>,
}

/// Discover, parse and aggregate the configured input directory.
///
/// Fails when the directory is missing, when no file matches the pattern
/// and when no file yields a valid record. Per-file problems only shrink
/// the result set.
pub fn run_analysis(config: &AnalyzerConfig) -> Result<AnalysisRun> {
    let input_dir = &config.input.directory;
    log::info!("Analyzing simulation logs in {}", input_dir.display());

    let paths = discover_logs(input_dir, &config.input.pattern)?;
    let batch = analysis::parse_all_logs(&paths, config.input.default_mesh_size);

    if batch.records.is_empty() {
        bail!(
            "No valid results found: none of the {} file(s) in {} yielded a valid record",
            batch.files_seen(),
            input_dir.display()
        );
    }

    let aggregation = analysis::aggregate(&batch.records);

    let metadata = AnalysisMetadata {
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        input_dir: input_dir.display().to_string(),
        files_found: batch.files_seen(),
        files_skipped: batch.skipped.len(),
        total_tests: batch.records.len(),
    };

    log::info!(
        "{} tests analyzed across {} routing algorithms",
        metadata.total_tests,
        aggregation.summaries.len()
    );

    Ok(AnalysisRun {
        report: AnalysisReport {
            metadata,
            aggregation,
            records: batch.records,
        },
        skipped: batch.skipped,
    })
}

/// Write the CSV table, text summary and, if configured, the JSON report
pub fn write_outputs(run: &AnalysisRun, config: &AnalyzerConfig) -> Result<OutputPaths> {
    let output_dir = config.output_dir();
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let paths = OutputPaths {
        csv: config.csv_path(),
        report: config.report_path(),
        json: config.json_path(),
    };

    analysis::write_csv_export(run.records(), &paths.csv)?;
    analysis::write_text_report(&run.report, &paths.report)?;
    if let Some(json_path) = &paths.json {
        analysis::write_json_report(&run.report, json_path)?;
    }

    log::info!("Analysis complete. Reports written to {}", output_dir.display());
    Ok(paths)
}
