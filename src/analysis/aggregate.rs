//! Grouping, per-group statistics and cross-group ranking.
//!
//! Groups are kept in `IndexMap`s so iteration follows the order in which
//! each key was first seen. The ranking tie-break depends on that order.

use indexmap::IndexMap;

use super::types::*;

/// Partition records by exact routing algorithm name
pub fn group_by_algorithm(records: &[ParsedRecord]) -> IndexMap<String, Vec<&ParsedRecord>> {
    let mut groups: IndexMap<String, Vec<&ParsedRecord>> = IndexMap::new();
    for record in records {
        groups
            .entry(record.routing_algorithm.clone())
            .or_default()
            .push(record);
    }
    groups
}

/// Partition records by (mesh size, routing algorithm)
pub fn group_by_mesh_and_algorithm(
    records: &[ParsedRecord],
) -> IndexMap<(MeshSize, String), Vec<&ParsedRecord>> {
    let mut groups: IndexMap<(MeshSize, String), Vec<&ParsedRecord>> = IndexMap::new();
    for record in records {
        groups
            .entry((record.mesh_size, record.routing_algorithm.clone()))
            .or_default()
            .push(record);
    }
    groups
}

/// Latency, hop count and throughput statistics for one algorithm
pub fn summarize_algorithm(algorithm: &str, records: &[&ParsedRecord]) -> AlgorithmSummary {
    let latencies: Vec<f64> = records.iter().map(|r| r.network_avg_latency).collect();
    let hops: Vec<f64> = records.iter().map(|r| r.network_avg_hops).collect();
    let throughputs: Vec<f64> = records.iter().map(|r| r.throughput).collect();

    AlgorithmSummary {
        algorithm: algorithm.to_string(),
        test_count: records.len(),
        latency: Statistics::from_samples(&latencies),
        hops: Statistics::from_samples(&hops),
        throughput: Statistics::from_samples(&throughputs),
    }
}

/// Pick the lowest mean latency and highest mean throughput.
///
/// Needs at least two summaries. The first summary seeds both bests and a
/// later one replaces a best only when strictly better, so ties go to the
/// algorithm seen first.
pub fn rank_algorithms(summaries: &[AlgorithmSummary]) -> Option<Ranking> {
    if summaries.len() < 2 {
        return None;
    }

    let first = &summaries[0];
    let mut lowest_latency = first;
    let mut highest_throughput = first;

    for summary in &summaries[1..] {
        if summary.latency.mean < lowest_latency.latency.mean {
            lowest_latency = summary;
        }
        if summary.throughput.mean > highest_throughput.throughput.mean {
            highest_throughput = summary;
        }
    }

    Some(Ranking {
        lowest_latency: RankedAlgorithm {
            algorithm: lowest_latency.algorithm.clone(),
            value: lowest_latency.latency.mean,
        },
        highest_throughput: RankedAlgorithm {
            algorithm: highest_throughput.algorithm.clone(),
            value: highest_throughput.throughput.mean,
        },
    })
}

/// Chart series per (mesh size, algorithm).
///
/// Points are sorted by injection rate and series by mesh size; both sorts
/// are stable, so algorithms keep their first-seen order within a mesh.
pub fn build_mesh_series(records: &[ParsedRecord]) -> Vec<MeshSeries> {
    let mut series: Vec<MeshSeries> = group_by_mesh_and_algorithm(records)
        .into_iter()
        .map(|((mesh_size, algorithm), group)| {
            let mut points: Vec<SeriesPoint> = group
                .iter()
                .map(|r| SeriesPoint {
                    injection_rate: r.injection_rate,
                    latency: r.network_avg_latency,
                    hops: r.network_avg_hops,
                    throughput: r.throughput,
                })
                .collect();
            points.sort_by_key(|p| p.injection_rate);
            MeshSeries {
                mesh_size,
                algorithm,
                points,
            }
        })
        .collect();

    series.sort_by_key(|s| s.mesh_size);
    series
}

/// Run every aggregation over a batch of valid records
pub fn aggregate(records: &[ParsedRecord]) -> Aggregation {
    let summaries: Vec<AlgorithmSummary> = group_by_algorithm(records)
        .iter()
        .map(|(algorithm, group)| summarize_algorithm(algorithm, group))
        .collect();

    for summary in &summaries {
        log::debug!(
            "{}: {} tests, latency {:.2}, throughput {:.3}",
            summary.algorithm,
            summary.test_count,
            summary.latency.mean,
            summary.throughput.mean
        );
    }

    let ranking = rank_algorithms(&summaries);

    Aggregation {
        summaries,
        ranking,
        mesh_series: build_mesh_series(records),
    }
}
