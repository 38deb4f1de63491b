//! Log parsing for NoC simulator output files.
//!
//! Turns one raw log into at most one [`ParsedRecord`]. Identity comes from
//! the file name first and the labelled header lines second; counters come
//! from the `Node <id>:` lines and the network summary line. Lines that fit
//! no pattern are ignored. Files are parsed in parallel and failures stay
//! local to the file that caused them.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;

use super::filename::parse_filename;
use super::metrics;
use super::types::*;

/// Compiled regex patterns for log parsing
pub struct LogPatterns {
    /// Match: "4x4" after a mesh size label
    pub mesh_size: Regex,
    /// Match: "30%" after an injection rate label
    pub percentage: Regex,
    /// Match: first integer, e.g. "1000" in "1000 ciclos"
    pub integer: Regex,
    /// Match: "Node 3: Sent=12, Received=40, Avg Latency=7.5, Avg Hops=2.1"
    pub node_line: Regex,
    /// Match: "Total Sent=120, Total Received=410, Avg Latency=8.2, Avg Hops=2.4"
    pub network_summary: Regex,
}

/// Decimal number as printed by the simulator, optionally in `%g` exponent form
const FLOAT: &str = r"([0-9.]+(?:[eE][+-]?\d+)?)";

impl LogPatterns {
    pub fn new() -> Self {
        Self {
            mesh_size: Regex::new(r"(\d+)x(\d+)").expect("Invalid mesh_size regex"),
            percentage: Regex::new(r"(\d+)%").expect("Invalid percentage regex"),
            integer: Regex::new(r"(\d+)").expect("Invalid integer regex"),
            node_line: Regex::new(&format!(
                r"^\s*Node (\d+): Sent=(\d+), Received=(\d+), Avg Latency={FLOAT}, Avg Hops={FLOAT}"
            ))
            .expect("Invalid node_line regex"),
            network_summary: Regex::new(&format!(
                r"Total Sent=(\d+), Total Received=(\d+), Avg Latency={FLOAT}, Avg Hops={FLOAT}"
            ))
            .expect("Invalid network_summary regex"),
        }
    }
}

impl Default for LogPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Global patterns instance
pub static PATTERNS: LazyLock<LogPatterns> = LazyLock::new(LogPatterns::new);

/// Header fields announced by a label followed by a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabeledField {
    MeshSize,
    RoutingAlgorithm,
    InjectionRate,
    SimulationTime,
}

/// One language's set of header labels
#[derive(Debug)]
pub struct LabelVocabulary {
    pub name: &'static str,
    pub mesh_size: &'static [&'static str],
    pub routing_algorithm: &'static [&'static str],
    pub injection_rate: &'static [&'static str],
    pub simulation_time: &'static [&'static str],
}

pub const PORTUGUESE: LabelVocabulary = LabelVocabulary {
    name: "pt",
    mesh_size: &["Tamanho da malha:"],
    routing_algorithm: &["Algoritmo de roteamento:"],
    injection_rate: &["Taxa de injeção de pacotes:"],
    simulation_time: &["Tempo de simulação:"],
};

pub const ENGLISH: LabelVocabulary = LabelVocabulary {
    name: "en",
    mesh_size: &["Mesh size:", "Mesh Size:"],
    routing_algorithm: &["Routing Algorithm:", "Routing algorithm:"],
    injection_rate: &["Packet injection rate:", "Injection rate:", "Injection Rate:"],
    simulation_time: &["Simulation time:", "Simulation Time:"],
};

/// Every vocabulary is checked on every line; callers never pick one
pub const VOCABULARIES: [&LabelVocabulary; 2] = [&PORTUGUESE, &ENGLISH];

impl LabelVocabulary {
    /// Find a label of this vocabulary in `line` and return the text after it
    pub fn match_line<'a>(&self, line: &'a str) -> Option<(LabeledField, &'a str)> {
        let fields = [
            (LabeledField::MeshSize, self.mesh_size),
            (LabeledField::RoutingAlgorithm, self.routing_algorithm),
            (LabeledField::InjectionRate, self.injection_rate),
            (LabeledField::SimulationTime, self.simulation_time),
        ];

        fields.iter().find_map(|(field, labels)| {
            labels.iter().find_map(|label| {
                line.find(label)
                    .map(|pos| (*field, &line[pos + label.len()..]))
            })
        })
    }
}

/// Lines the simulator prints when a run starts. One log may hold several
/// runs: a `-routing XY` invocation appends a WEST_FIRST comparison run.
pub const RUN_MARKERS: [&str; 2] = ["Iniciando simulação", "Running simulation"];

/// Fields of one simulation run found in a log
#[derive(Debug, Default)]
struct RunBlock {
    mesh_size: Option<MeshSize>,
    routing_algorithm: Option<String>,
    injection_rate: Option<u32>,
    simulation_time: Option<u64>,
    summary: Option<NetworkSummary>,
    summary_lines: usize,
    nodes: Vec<NodeMetric>,
}

impl RunBlock {
    fn is_empty(&self) -> bool {
        self.mesh_size.is_none()
            && self.routing_algorithm.is_none()
            && self.injection_rate.is_none()
            && self.simulation_time.is_none()
            && self.summary_lines == 0
            && self.nodes.is_empty()
    }

    /// A labelled line naming another algorithm than the one already seen
    fn switches_algorithm(&self, field: LabeledField, rest: &str) -> bool {
        let name = rest.trim();
        field == LabeledField::RoutingAlgorithm
            && !name.is_empty()
            && self.routing_algorithm.as_deref().is_some_and(|current| current != name)
    }

    /// Lay `later` over `self`, field by field. Set fields of `later` win.
    fn overlay(self, later: RunBlock) -> RunBlock {
        RunBlock {
            mesh_size: later.mesh_size.or(self.mesh_size),
            routing_algorithm: later.routing_algorithm.or(self.routing_algorithm),
            injection_rate: later.injection_rate.or(self.injection_rate),
            simulation_time: later.simulation_time.or(self.simulation_time),
            summary: later.summary.or(self.summary),
            summary_lines: self.summary_lines + later.summary_lines,
            nodes: if later.nodes.is_empty() { self.nodes } else { later.nodes },
        }
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str, line: usize) -> Result<T, SkipReason> {
    value.parse().map_err(|_| SkipReason::MalformedField {
        field,
        value: value.to_string(),
        line,
    })
}

/// Apply one labelled header line. Values that do not fit the expected
/// shape leave the field untouched.
fn apply_label(
    run: &mut RunBlock,
    field: LabeledField,
    rest: &str,
    line_no: usize,
) -> Result<(), SkipReason> {
    match field {
        LabeledField::MeshSize => {
            if let Some(caps) = PATTERNS.mesh_size.captures(rest) {
                let width: u32 = parse_field("mesh width", &caps[1], line_no)?;
                let height: u32 = parse_field("mesh height", &caps[2], line_no)?;
                if width == 0 || height == 0 {
                    log::warn!("Ignoring mesh size {} on line {}", &caps[0], line_no);
                } else {
                    run.mesh_size = Some(MeshSize::new(width, height));
                }
            }
        }
        LabeledField::RoutingAlgorithm => {
            let name = rest.trim();
            if !name.is_empty() {
                run.routing_algorithm = Some(name.to_string());
            }
        }
        LabeledField::InjectionRate => {
            if let Some(caps) = PATTERNS.percentage.captures(rest) {
                run.injection_rate = Some(parse_field("injection rate", &caps[1], line_no)?);
            }
        }
        LabeledField::SimulationTime => {
            if let Some(caps) = PATTERNS.integer.captures(rest) {
                run.simulation_time = Some(parse_field("simulation time", &caps[1], line_no)?);
            }
        }
    }
    Ok(())
}

/// Scan every line of a log and split it into runs.
///
/// A new run starts at a run marker or when the algorithm label changes.
/// Within a run, line order does not matter and later occurrences of a
/// field win.
fn scan_content(content: &str) -> Result<Vec<RunBlock>, SkipReason> {
    let mut runs = Vec::new();
    let mut current = RunBlock::default();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;

        if RUN_MARKERS.iter().any(|marker| line.trim_start().starts_with(marker)) {
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some((field, rest)) = VOCABULARIES.iter().find_map(|v| v.match_line(line)) {
            if current.switches_algorithm(field, rest) {
                runs.push(std::mem::take(&mut current));
            }
            apply_label(&mut current, field, rest, line_no)?;
            continue;
        }

        if let Some(caps) = PATTERNS.node_line.captures(line) {
            current.nodes.push(NodeMetric {
                node_id: parse_field("node id", &caps[1], line_no)?,
                packets_sent: parse_field("node sent", &caps[2], line_no)?,
                packets_received: parse_field("node received", &caps[3], line_no)?,
                avg_latency: parse_field("node latency", &caps[4], line_no)?,
                avg_hops: parse_field("node hops", &caps[5], line_no)?,
            });
            continue;
        }

        if let Some(caps) = PATTERNS.network_summary.captures(line) {
            current.summary = Some(NetworkSummary {
                total_sent: parse_field("total sent", &caps[1], line_no)?,
                total_received: parse_field("total received", &caps[2], line_no)?,
                avg_latency: parse_field("network latency", &caps[3], line_no)?,
                avg_hops: parse_field("network hops", &caps[4], line_no)?,
            });
            current.summary_lines += 1;
        }
    }

    if !current.is_empty() || runs.is_empty() {
        runs.push(current);
    }
    Ok(runs)
}

/// Pick the run the record describes: the last one labelled with
/// `algorithm`, or all runs laid over each other when none is.
fn select_run(mut runs: Vec<RunBlock>, algorithm: &str, file_name: &str) -> RunBlock {
    if runs.len() > 1 {
        log::debug!("{}: {} runs in one log, using {}", file_name, runs.len(), algorithm);
    }

    match runs
        .iter()
        .rposition(|run| run.routing_algorithm.as_deref() == Some(algorithm))
    {
        Some(idx) => runs.swap_remove(idx),
        None => runs.into_iter().fold(RunBlock::default(), RunBlock::overlay),
    }
}

fn build_record(raw: &RawLog, default_mesh: MeshSize) -> Result<ParsedRecord, SkipReason> {
    let name_info = parse_filename(&raw.file_name)?;
    let runs = scan_content(&raw.content)?;

    let content_algorithm = runs
        .iter()
        .rev()
        .find_map(|run| run.routing_algorithm.clone());
    let routing_algorithm = name_info
        .algorithm
        .or(content_algorithm)
        .filter(|name| !name.is_empty())
        .ok_or(SkipReason::MissingAlgorithm)?;

    let run = select_run(runs, &routing_algorithm, &raw.file_name);

    if run.summary_lines == 0 {
        log::debug!("{}: no network summary line, totals default to zero", raw.file_name);
    } else if run.summary_lines > 1 {
        log::warn!(
            "{}: {} network summary lines, keeping the last one",
            raw.file_name,
            run.summary_lines
        );
    }

    let summary = run.summary.unwrap_or_default();
    let simulation_time = run.simulation_time.unwrap_or(0);

    Ok(ParsedRecord {
        file_name: raw.file_name.clone(),
        timestamp: name_info.timestamp,
        started_at: name_info.started_at,
        routing_algorithm,
        mesh_size: name_info
            .mesh_size
            .or(run.mesh_size)
            .unwrap_or(default_mesh),
        injection_rate: name_info
            .injection_rate
            .or(run.injection_rate)
            .unwrap_or(0),
        simulation_time,
        total_sent: summary.total_sent,
        total_received: summary.total_received,
        network_avg_latency: summary.avg_latency,
        network_avg_hops: summary.avg_hops,
        throughput: metrics::throughput(summary.total_received, simulation_time),
        network_efficiency: metrics::network_efficiency(
            summary.total_sent,
            summary.total_received,
            summary.avg_hops,
        ),
        nodes: run.nodes,
    })
}

/// Extract a record from one raw log.
///
/// `default_mesh` is used when neither the file name nor the content
/// states a mesh size.
pub fn extract_record(raw: &RawLog, default_mesh: MeshSize) -> ParseOutcome {
    match build_record(raw, default_mesh) {
        Ok(record) => ParseOutcome::Parsed(record),
        Err(reason) => ParseOutcome::Skipped(SkippedFile {
            file_name: raw.file_name.clone(),
            reason,
        }),
    }
}

/// Read a log file as text
pub fn read_raw_log(path: &Path) -> Result<RawLog, SkipReason> {
    let content = fs::read_to_string(path)?;
    Ok(RawLog::new(display_name(path), content))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read and parse a single log file
pub fn parse_log_file(path: &Path, default_mesh: MeshSize) -> ParseOutcome {
    match read_raw_log(path) {
        Ok(raw) => extract_record(&raw, default_mesh),
        Err(reason) => ParseOutcome::Skipped(SkippedFile {
            file_name: display_name(path),
            reason,
        }),
    }
}

/// Parse all log files in parallel. Output order follows `paths`.
pub fn parse_all_logs(paths: &[PathBuf], default_mesh: MeshSize) -> ParseBatch {
    log::info!("Parsing {} log files in parallel...", paths.len());

    let outcomes: Vec<ParseOutcome> = paths
        .par_iter()
        .map(|path| parse_log_file(path, default_mesh))
        .collect();

    let mut batch = ParseBatch::default();
    for outcome in outcomes {
        match outcome {
            ParseOutcome::Parsed(record) => {
                log::debug!(
                    "Parsed {}: {} {} at {}%, {} node lines",
                    record.file_name,
                    record.routing_algorithm,
                    record.mesh_size,
                    record.injection_rate,
                    record.nodes.len()
                );
                batch.records.push(record);
            }
            ParseOutcome::Skipped(skipped) => {
                log::warn!("Skipping {}: {}", skipped.file_name, skipped.reason);
                batch.skipped.push(skipped);
            }
        }
    }

    log::info!(
        "Parsed {} valid records, skipped {} files",
        batch.records.len(),
        batch.skipped.len()
    );

    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    const PT_LOG: &str = "\
Iniciando simulação NoC...
Tamanho da malha: 4x4
Algoritmo de roteamento: XY
Taxa de injeção de pacotes: 30%
Tempo de simulação: 1000 ciclos
--------------------------------------------

-------- Simulation Statistics --------
Routing Algorithm: XY
Node 0: Sent=10, Received=25, Avg Latency=6.5, Avg Hops=2
Node 1: Sent=12, Received=31, Avg Latency=7.25, Avg Hops=2.5
Network Summary: Total Sent=22, Total Received=56, Avg Latency=6.9, Avg Hops=2.25
";

    const EN_LOG: &str = "\
Mesh size: 8x8
Routing Algorithm: WEST_FIRST
Injection rate: 20%
Simulation time: 2000 cycles
Network Summary: Total Sent=40, Total Received=100, Avg Latency=9.5, Avg Hops=5
";

    fn parsed(outcome: ParseOutcome) -> ParsedRecord {
        match outcome {
            ParseOutcome::Parsed(record) => record,
            ParseOutcome::Skipped(s) => panic!("unexpected skip: {}", s.reason),
        }
    }

    fn skipped(outcome: ParseOutcome) -> SkipReason {
        match outcome {
            ParseOutcome::Skipped(s) => s.reason,
            ParseOutcome::Parsed(r) => panic!("unexpected record for {}", r.file_name),
        }
    }

    #[test]
    fn test_node_line_regex() {
        let line = "Node 12: Sent=5, Received=17, Avg Latency=11.75, Avg Hops=3.2";
        let caps = PATTERNS.node_line.captures(line).unwrap();
        assert_eq!(&caps[1], "12");
        assert_eq!(&caps[2], "5");
        assert_eq!(&caps[3], "17");
        assert_eq!(&caps[4], "11.75");
        assert_eq!(&caps[5], "3.2");
    }

    #[test]
    fn test_network_summary_regex_exponent() {
        let line = "Network Summary: Total Sent=9, Total Received=9, Avg Latency=1.23457e+06, Avg Hops=2";
        let caps = PATTERNS.network_summary.captures(line).unwrap();
        assert_eq!(&caps[3], "1.23457e+06");
    }

    #[test]
    fn test_vocabularies_match_both_languages() {
        let (field, rest) = PORTUGUESE.match_line("Tempo de simulação: 1000 ciclos").unwrap();
        assert_eq!(field, LabeledField::SimulationTime);
        assert_eq!(rest.trim(), "1000 ciclos");

        let (field, rest) = ENGLISH.match_line("Routing Algorithm: XY").unwrap();
        assert_eq!(field, LabeledField::RoutingAlgorithm);
        assert_eq!(rest.trim(), "XY");

        assert!(ENGLISH.match_line("Tamanho da malha: 4x4").is_none());
        assert!(PORTUGUESE.match_line("Node 1: Sent=1").is_none());
    }

    #[test]
    fn test_portuguese_log_with_mesh_filename() {
        let raw = RawLog::new("test_XY_4x4_30pct_2024-01-15_10-30-00.txt", PT_LOG);
        let record = parsed(extract_record(&raw, MeshSize::default()));

        assert_eq!(record.routing_algorithm, "XY");
        assert_eq!(record.mesh_size, MeshSize::new(4, 4));
        assert_eq!(record.injection_rate, 30);
        assert_eq!(record.simulation_time, 1000);
        assert_eq!(record.total_sent, 22);
        assert_eq!(record.total_received, 56);
        assert_eq!(record.network_avg_latency, 6.9);
        assert_eq!(record.network_avg_hops, 2.25);
        assert_eq!(record.throughput, 56.0 / 1000.0);
        assert_eq!(record.network_efficiency, 22.0 / (56.0 / 2.25));
        assert_eq!(record.timestamp_token(), "2024-01-15_10-30-00");

        assert_eq!(record.nodes.len(), 2);
        assert_eq!(record.nodes[1].node_id, 1);
        assert_eq!(record.nodes[1].packets_received, 31);
        assert_eq!(record.nodes[1].avg_latency, 7.25);
    }

    #[test]
    fn test_english_log_without_mesh_in_filename() {
        let raw = RawLog::new("test_WestFirst_20pct_run.txt", EN_LOG);
        let record = parsed(extract_record(&raw, MeshSize::default()));

        // file name identity wins over the content label
        assert_eq!(record.routing_algorithm, "WestFirst");
        assert_eq!(record.mesh_size, MeshSize::new(8, 8));
        assert_eq!(record.injection_rate, 20);
        assert_eq!(record.simulation_time, 2000);
        assert_eq!(record.timestamp, None);
        assert!(record.nodes.is_empty());
    }

    #[test]
    fn test_filename_identity_wins() {
        let raw = RawLog::new("test_XY_2x2_70pct_a.txt", EN_LOG);
        let record = parsed(extract_record(&raw, MeshSize::default()));
        assert_eq!(record.routing_algorithm, "XY");
        assert_eq!(record.mesh_size, MeshSize::new(2, 2));
        assert_eq!(record.injection_rate, 70);
    }

    #[test]
    fn test_content_identity_for_unstructured_name() {
        let raw = RawLog::new("test_rerun.txt", EN_LOG);
        let record = parsed(extract_record(&raw, MeshSize::default()));
        assert_eq!(record.routing_algorithm, "WEST_FIRST");
        assert_eq!(record.injection_rate, 20);
    }

    #[test]
    fn test_default_mesh_when_absent() {
        let content = "Routing Algorithm: XY\nTotal Sent=1, Total Received=2, Avg Latency=3, Avg Hops=1\n";
        let raw = RawLog::new("test_XY_10pct_a.txt", content);
        let record = parsed(extract_record(&raw, MeshSize::new(6, 6)));
        assert_eq!(record.mesh_size, MeshSize::new(6, 6));
    }

    #[test]
    fn test_missing_algorithm_is_skipped() {
        let content = "Mesh size: 4x4\nTotal Sent=1, Total Received=2, Avg Latency=3, Avg Hops=1\n";
        let raw = RawLog::new("test_broken.txt", content);
        assert!(matches!(
            skipped(extract_record(&raw, MeshSize::default())),
            SkipReason::MissingAlgorithm
        ));
    }

    #[test]
    fn test_blank_algorithm_label_is_unset() {
        let raw = RawLog::new("test_broken.txt", "Routing Algorithm:   \n");
        assert!(matches!(
            skipped(extract_record(&raw, MeshSize::default())),
            SkipReason::MissingAlgorithm
        ));
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let raw = RawLog::new("test_other.txt", "Algoritmo de roteamento: XY\n");
        let record = parsed(extract_record(&raw, MeshSize::default()));
        assert_eq!(record.routing_algorithm, "XY");
        assert_eq!(record.simulation_time, 0);
        assert_eq!(record.total_sent, 0);
        assert_eq!(record.throughput, 0.0);
        assert_eq!(record.network_efficiency, 0.0);
    }

    #[test]
    fn test_malformed_number_skips_file() {
        let content = "Routing Algorithm: XY\nNode 0: Sent=1, Received=2, Avg Latency=1.2.3, Avg Hops=1\n";
        let raw = RawLog::new("test_XY_10pct_a.txt", content);
        match skipped(extract_record(&raw, MeshSize::default())) {
            SkipReason::MalformedField { field, value, line } => {
                assert_eq!(field, "node latency");
                assert_eq!(value, "1.2.3");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected reason: {other}"),
        }
    }

    #[test]
    fn test_last_summary_line_wins() {
        let content = "\
Routing Algorithm: XY
Network Summary: Total Sent=1, Total Received=1, Avg Latency=1, Avg Hops=1
Network Summary: Total Sent=9, Total Received=8, Avg Latency=7, Avg Hops=2
";
        let raw = RawLog::new("test_XY_10pct_a.txt", content);
        let record = parsed(extract_record(&raw, MeshSize::default()));
        assert_eq!(record.total_sent, 9);
        assert_eq!(record.total_received, 8);
    }

    const TWO_RUN_LOG: &str = "\
Running simulation with XY routing algorithm...
Iniciando simulação NoC...
Tamanho da malha: 4x4
Algoritmo de roteamento: XY
Taxa de injeção de pacotes: 10%
Tempo de simulação: 1000 ciclos
--------------------------------------------

-------- Simulation Statistics --------
Routing Algorithm: XY
Node 0: Sent=50, Received=100, Avg Latency=10, Avg Hops=5
Network Summary: Total Sent=50, Total Received=100, Avg Latency=10, Avg Hops=5


Running simulation with WEST_FIRST routing algorithm for comparison...
Iniciando simulação NoC...
Tamanho da malha: 4x4
Algoritmo de roteamento: WEST_FIRST
Taxa de injeção de pacotes: 10%
Tempo de simulação: 2000 ciclos
--------------------------------------------

-------- Simulation Statistics --------
Routing Algorithm: WEST_FIRST
Node 0: Sent=70, Received=140, Avg Latency=99, Avg Hops=4
Node 1: Sent=1, Received=2, Avg Latency=1, Avg Hops=1
Network Summary: Total Sent=70, Total Received=140, Avg Latency=99, Avg Hops=4
";

    #[test]
    fn test_comparison_run_does_not_leak_into_named_run() {
        let raw = RawLog::new("test_XY_4x4_10pct_2024-01-15_10-30-00.txt", TWO_RUN_LOG);
        let record = parsed(extract_record(&raw, MeshSize::default()));
        assert_eq!(record.routing_algorithm, "XY");
        assert_eq!(record.total_sent, 50);
        assert_eq!(record.total_received, 100);
        assert_eq!(record.network_avg_latency, 10.0);
        assert_eq!(record.simulation_time, 1000);
        assert_eq!(record.throughput, 0.1);
        assert_eq!(record.nodes.len(), 1);
    }

    #[test]
    fn test_run_picked_by_file_name_algorithm() {
        let raw = RawLog::new("test_WEST_FIRST_4x4_10pct_a.txt", TWO_RUN_LOG);
        let record = parsed(extract_record(&raw, MeshSize::default()));
        assert_eq!(record.routing_algorithm, "WEST_FIRST");
        assert_eq!(record.total_sent, 70);
        assert_eq!(record.network_avg_latency, 99.0);
        assert_eq!(record.simulation_time, 2000);
        assert_eq!(record.nodes.len(), 2);
    }

    #[test]
    fn test_unstructured_name_uses_last_run() {
        let raw = RawLog::new("test_rerun.txt", TWO_RUN_LOG);
        let record = parsed(extract_record(&raw, MeshSize::default()));
        assert_eq!(record.routing_algorithm, "WEST_FIRST");
        assert_eq!(record.total_sent, 70);
    }

    #[test]
    fn test_unmatched_algorithm_falls_back_to_last_values() {
        let raw = RawLog::new("test_OddEven_4x4_10pct_a.txt", TWO_RUN_LOG);
        let record = parsed(extract_record(&raw, MeshSize::default()));
        assert_eq!(record.routing_algorithm, "OddEven");
        assert_eq!(record.total_sent, 70);
        assert_eq!(record.simulation_time, 2000);
    }

    #[test]
    fn test_algorithm_change_without_marker_splits_runs() {
        let content = "\
Routing Algorithm: XY
Simulation time: 1000 cycles
Network Summary: Total Sent=5, Total Received=10, Avg Latency=3, Avg Hops=2
Routing Algorithm: WEST_FIRST
Network Summary: Total Sent=7, Total Received=20, Avg Latency=4, Avg Hops=2
";
        let raw = RawLog::new("test_XY_10pct_a.txt", content);
        let record = parsed(extract_record(&raw, MeshSize::default()));
        assert_eq!(record.total_sent, 5);
        assert_eq!(record.throughput, 0.01);
    }

    #[test]
    fn test_zero_mesh_label_is_ignored() {
        let content = "\
Tamanho da malha: 0x4
Algoritmo de roteamento: XY
Network Summary: Total Sent=1, Total Received=2, Avg Latency=3, Avg Hops=1
";
        let raw = RawLog::new("test_XY_10pct_a.txt", content);
        let record = parsed(extract_record(&raw, MeshSize::new(6, 6)));
        assert_eq!(record.mesh_size, MeshSize::new(6, 6));
        assert_eq!(record.total_sent, 1);
    }

    #[test]
    fn test_overflowing_file_name_number_skips_file() {
        let raw = RawLog::new("test_XY_99999999999pct_a.txt", EN_LOG);
        assert!(matches!(
            skipped(extract_record(&raw, MeshSize::default())),
            SkipReason::MalformedFileName { field: "injection rate", .. }
        ));
    }

    #[test]
    fn test_impossible_date_keeps_token() {
        let raw = RawLog::new("test_XY_10pct_2024-02-30_10-00-00.txt", EN_LOG);
        let record = parsed(extract_record(&raw, MeshSize::default()));
        assert_eq!(record.timestamp_token(), "2024-02-30_10-00-00");
        assert_eq!(record.started_at, None);
    }

    #[test]
    fn test_line_order_does_not_matter() {
        let content = "\
Network Summary: Total Sent=22, Total Received=56, Avg Latency=6.9, Avg Hops=2.25
Tempo de simulação: 1000 ciclos
Algoritmo de roteamento: XY
";
        let raw = RawLog::new("test_x.txt", content);
        let record = parsed(extract_record(&raw, MeshSize::default()));
        assert_eq!(record.throughput, 0.056);
    }

    #[test]
    fn test_parse_all_logs_keeps_order_and_skips() {
        let dir = tempfile::tempdir().unwrap();
        let good_a = dir.path().join("test_XY_4x4_10pct_a.txt");
        let bad = dir.path().join("test_nothing.txt");
        let good_b = dir.path().join("test_WestFirst_4x4_10pct_b.txt");
        let missing = dir.path().join("test_gone.txt");
        fs::write(&good_a, PT_LOG).unwrap();
        fs::write(&bad, "garbage\n").unwrap();
        fs::write(&good_b, EN_LOG).unwrap();

        let paths = vec![good_a, bad, good_b, missing];
        let batch = parse_all_logs(&paths, MeshSize::default());

        assert_eq!(batch.files_seen(), 4);
        let names: Vec<&str> = batch.records.iter().map(|r| r.routing_algorithm.as_str()).collect();
        assert_eq!(names, vec!["XY", "WestFirst"]);
        assert_eq!(batch.skipped.len(), 2);
        assert!(matches!(batch.skipped[0].reason, SkipReason::MissingAlgorithm));
        assert!(matches!(batch.skipped[1].reason, SkipReason::Unreadable(_)));
    }
}
