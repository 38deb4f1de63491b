//! Report generation for NoC result analysis.
//!
//! Produces the per-run CSV table, a human-readable summary and a JSON
//! dump of the full report for chart renderers.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use super::types::*;

/// Fixed column order of the CSV export
pub const CSV_HEADER: &str = "timestamp,routing_algorithm,mesh_size,injection_rate,simulation_time,\
total_sent,total_received,network_avg_latency,network_avg_hops,throughput,network_efficiency";

/// Quote a CSV field only when it needs it
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// One CSV row for a record, without the trailing newline
pub fn csv_row(record: &ParsedRecord) -> String {
    [
        csv_field(record.timestamp_token()),
        csv_field(&record.routing_algorithm),
        record.mesh_size.to_string(),
        record.injection_rate.to_string(),
        record.simulation_time.to_string(),
        record.total_sent.to_string(),
        record.total_received.to_string(),
        record.network_avg_latency.to_string(),
        record.network_avg_hops.to_string(),
        record.throughput.to_string(),
        record.network_efficiency.to_string(),
    ]
    .join(",")
}

/// Render the CSV table: header plus one row per record
pub fn render_csv(records: &[ParsedRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + records.len() * 96);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&csv_row(record));
        out.push('\n');
    }
    out
}

/// Generate CSV export
pub fn write_csv_export(records: &[ParsedRecord], output_path: &Path) -> Result<()> {
    fs::write(output_path, render_csv(records))
        .with_context(|| format!("Failed to write CSV export to {}", output_path.display()))?;

    log::info!("CSV export written to {} ({} rows)", output_path.display(), records.len());
    Ok(())
}

/// Generate JSON report
pub fn write_json_report(report: &AnalysisReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

fn stat_line(label: &str, stats: &Statistics, precision: usize, unit: &str) -> String {
    format!(
        "{label}: {mean:.p$} ± {std:.p$}{unit} (min {min:.p$}, max {max:.p$})",
        mean = stats.mean,
        std = stats.std_dev,
        min = stats.min,
        max = stats.max,
        p = precision,
    )
}

/// Render the human-readable summary
pub fn render_text_report(report: &AnalysisReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("NOC SIMULATION ANALYSIS REPORT".to_string());
    lines.push("=".repeat(50));
    lines.push(String::new());
    lines.push(format!("Generated: {}", report.metadata.generated_at));
    lines.push(format!("Input directory: {}", report.metadata.input_dir));
    lines.push(format!("Total tests analyzed: {}", report.metadata.total_tests));
    if report.metadata.files_skipped > 0 {
        lines.push(format!(
            "Files skipped: {} of {}",
            report.metadata.files_skipped, report.metadata.files_found
        ));
    }
    lines.push(String::new());

    // Per-algorithm statistics
    lines.push("STATISTICS BY ALGORITHM".to_string());
    lines.push("-".repeat(30));

    for summary in &report.aggregation.summaries {
        lines.push(String::new());
        lines.push(summary.algorithm.to_uppercase());
        lines.push(".".repeat(20));
        lines.push(format!("Tests: {}", summary.test_count));
        lines.push(stat_line("Average latency", &summary.latency, 2, " cycles"));
        lines.push(stat_line("Average hops", &summary.hops, 2, ""));
        lines.push(stat_line("Average throughput", &summary.throughput, 3, " packets/cycle"));
    }

    // Comparison
    if let Some(ref ranking) = report.aggregation.ranking {
        lines.push(String::new());
        lines.push(String::new());
        lines.push("PERFORMANCE COMPARISON".to_string());
        lines.push("=".repeat(30));
        lines.push(format!(
            "Lowest average latency: {} ({:.2} cycles)",
            ranking.lowest_latency.algorithm, ranking.lowest_latency.value
        ));
        lines.push(format!(
            "Highest average throughput: {} ({:.3} packets/cycle)",
            ranking.highest_throughput.algorithm, ranking.highest_throughput.value
        ));
    }

    lines.push(String::new());

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Generate human-readable text report
pub fn write_text_report(report: &AnalysisReport, output_path: &Path) -> Result<()> {
    let mut content = render_text_report(report);
    content.push_str(&format!("Report saved to: {}\n", output_path.display()));

    fs::write(output_path, content)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

/// Print a summary to stdout
pub fn print_summary(report: &AnalysisReport) {
    println!("\n=== NOC RESULTS SUMMARY ===\n");
    println!("Tests analyzed: {}", report.metadata.total_tests);
    if report.metadata.files_skipped > 0 {
        println!("Files skipped: {}", report.metadata.files_skipped);
    }
    println!();

    for summary in &report.aggregation.summaries {
        println!(
            "{}: latency={:.2}, throughput={:.3} ({} tests)",
            summary.algorithm, summary.latency.mean, summary.throughput.mean, summary.test_count
        );
    }

    if let Some(ref ranking) = report.aggregation.ranking {
        println!();
        println!(
            "Lowest latency: {} ({:.2} cycles)",
            ranking.lowest_latency.algorithm, ranking.lowest_latency.value
        );
        println!(
            "Highest throughput: {} ({:.3} packets/cycle)",
            ranking.highest_throughput.algorithm, ranking.highest_throughput.value
        );
    }

    println!();
}
