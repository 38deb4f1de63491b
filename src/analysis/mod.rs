//! Result analysis for NoC simulation runs.
//!
//! This module extracts per-run records from simulator logs, derives
//! throughput and efficiency, aggregates them per routing algorithm and
//! renders the reports.

pub mod types;
pub mod filename;
pub mod log_parser;
pub mod metrics;
pub mod stats;
pub mod aggregate;
pub mod report;

pub use types::*;
pub use filename::{parse_filename, FilenameGrammar, FilenameInfo};
pub use log_parser::{extract_record, parse_all_logs};
pub use aggregate::aggregate;
pub use report::{write_csv_export, write_json_report, write_text_report};
