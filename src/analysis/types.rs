//! Core data types for NoC simulation result analysis.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Filename token format of a run timestamp, e.g. `2024-03-01_14-05-59`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// A log file as read from disk. Dropped once the extractor is done with it.
#[derive(Debug, Clone)]
pub struct RawLog {
    pub file_name: String,
    pub content: String,
}

impl RawLog {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// Grid dimensions of the simulated mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MeshSize {
    pub width: u32,
    pub height: u32,
}

impl MeshSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for MeshSize {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl fmt::Display for MeshSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Error returned when a mesh size string is not of the form `WxH`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid mesh size '{0}', expected WxH with non-zero dimensions")]
pub struct ParseMeshSizeError(pub String);

impl FromStr for MeshSize {
    type Err = ParseMeshSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMeshSizeError(s.to_string());
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(err)?;
        let width: u32 = w.trim().parse().map_err(|_| err())?;
        let height: u32 = h.trim().parse().map_err(|_| err())?;
        if width == 0 || height == 0 {
            return Err(err());
        }
        Ok(Self { width, height })
    }
}

impl From<MeshSize> for String {
    fn from(mesh: MeshSize) -> Self {
        mesh.to_string()
    }
}

impl TryFrom<String> for MeshSize {
    type Error = ParseMeshSizeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Per-node counters from a `Node <id>: ...` line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMetric {
    pub node_id: u32,
    pub packets_sent: u64,
    pub packets_received: u64,
    pub avg_latency: f64,
    pub avg_hops: f64,
}

/// Network-wide totals from the `Total Sent=...` line
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub total_sent: u64,
    pub total_received: u64,
    pub avg_latency: f64,
    pub avg_hops: f64,
}

/// Outcome of one simulation run.
///
/// Built once by the extractor; `throughput` and `network_efficiency` are
/// derived from the network totals at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub file_name: String,
    /// Timestamp token from the file name, as written there
    pub timestamp: Option<String>,
    /// `timestamp` as a date, when it is a real calendar date
    pub started_at: Option<NaiveDateTime>,
    pub routing_algorithm: String,
    pub mesh_size: MeshSize,
    pub injection_rate: u32,
    pub simulation_time: u64,
    pub total_sent: u64,
    pub total_received: u64,
    pub network_avg_latency: f64,
    pub network_avg_hops: f64,
    pub throughput: f64,
    pub network_efficiency: f64,
    pub nodes: Vec<NodeMetric>,
}

impl ParsedRecord {
    /// Timestamp in its filename form, empty when absent
    pub fn timestamp_token(&self) -> &str {
        self.timestamp.as_deref().unwrap_or("")
    }
}

/// Why a file did not produce a record
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("failed to read file: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("no routing algorithm found in file name or content")]
    MissingAlgorithm,

    #[error("malformed {field} value '{value}' on line {line}")]
    MalformedField {
        field: &'static str,
        value: String,
        line: usize,
    },

    #[error("malformed {field} value '{value}' in file name")]
    MalformedFileName { field: &'static str, value: String },
}

/// A file that was dropped from the batch, with the reason
#[derive(Debug)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: SkipReason,
}

/// Per-file extraction result
#[derive(Debug)]
pub enum ParseOutcome {
    Parsed(ParsedRecord),
    Skipped(SkippedFile),
}

/// All extraction results of one batch, in input order
#[derive(Debug, Default)]
pub struct ParseBatch {
    pub records: Vec<ParsedRecord>,
    pub skipped: Vec<SkippedFile>,
}

impl ParseBatch {
    pub fn files_seen(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

/// Descriptive statistics of one metric over one group
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Statistics for every record sharing a routing algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmSummary {
    pub algorithm: String,
    pub test_count: usize,
    pub latency: Statistics,
    pub hops: Statistics,
    pub throughput: Statistics,
}

/// An algorithm together with the group mean it won with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlgorithm {
    pub algorithm: String,
    pub value: f64,
}

/// Cross-algorithm comparison, only present with two or more algorithms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub lowest_latency: RankedAlgorithm,
    pub highest_throughput: RankedAlgorithm,
}

/// One run as plotted against injection rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub injection_rate: u32,
    pub latency: f64,
    pub hops: f64,
    pub throughput: f64,
}

/// Chart series for one (mesh size, algorithm) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshSeries {
    pub mesh_size: MeshSize,
    pub algorithm: String,
    pub points: Vec<SeriesPoint>,
}

/// Everything the aggregator derives from a batch of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub summaries: Vec<AlgorithmSummary>,
    pub ranking: Option<Ranking>,
    pub mesh_series: Vec<MeshSeries>,
}

/// Metadata about an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub generated_at: String,
    pub input_dir: String,
    pub files_found: usize,
    pub files_skipped: usize,
    pub total_tests: usize,
}

/// Full report handed to the emitters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: AnalysisMetadata,
    #[serde(flatten)]
    pub aggregation: Aggregation,
    pub records: Vec<ParsedRecord>,
}
