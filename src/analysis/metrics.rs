//! Derived per-run metrics.
//!
//! Both formulas read only the network summary totals, never the per-node lines.

/// Received units per simulated cycle. Zero when the run length is zero.
pub fn throughput(total_received: u64, simulation_time: u64) -> f64 {
    if simulation_time == 0 {
        return 0.0;
    }
    total_received as f64 / simulation_time as f64
}

/// Proxy efficiency `sent / (received / hops)`.
///
/// The simulator counts every hop event as a reception, so `received / hops`
/// approximates delivered packets. The result is not bounded to 0..1.
/// Zero when either `received` or `hops` is zero.
pub fn network_efficiency(total_sent: u64, total_received: u64, avg_hops: f64) -> f64 {
    if total_received == 0 || avg_hops == 0.0 {
        return 0.0;
    }
    total_sent as f64 / (total_received as f64 / avg_hops)
}
