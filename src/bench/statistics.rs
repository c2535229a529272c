//! Run summary statistics
//!
//! Pure reduction from a completed sample set to its summary metrics:
//! throughput over wall-clock duration, mean latency, and index-based
//! (non-interpolated) 95th-percentile latency. Failed samples are blended
//! into the latency statistics and surfaced separately via `failed_requests`
//! so slow and broken stay distinguishable in the report.

use serde::{Deserialize, Serialize};

use crate::bench::SampleSet;

/// Summary metrics derived once from one completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Endpoint the run targeted
    pub endpoint: String,
    /// Requests per second over the wall-clock run duration
    pub throughput_rps: f64,
    /// Arithmetic mean latency in milliseconds, failures included
    pub mean_latency_ms: f64,
    /// 95th-percentile latency in milliseconds, failures included
    pub p95_latency_ms: f64,
    /// Number of samples the run recorded
    pub samples: usize,
    /// Samples that failed (non-2xx or transport error)
    pub failed_requests: usize,
}

impl RunSummary {
    /// Reduce a completed sample set into its summary
    ///
    /// Deterministic in the set's contents: latencies are sorted before any
    /// reduction, so two sets holding the same observations in different
    /// completion orders produce bit-identical summaries. Returns `None` for
    /// an empty set.
    #[must_use]
    pub fn from_run(set: &SampleSet) -> Option<Self> {
        if set.is_empty() {
            return None;
        }

        let mut latencies = set.latencies_ms();
        latencies.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n = latencies.len();

        let mean_latency_ms = latencies.iter().sum::<f64>() / n as f64;
        let p95_latency_ms = latencies[percentile_index(n, 0.95)];

        let wall_clock_ms = set.wall_clock().as_secs_f64() * 1000.0;
        let throughput_rps = if wall_clock_ms > 0.0 {
            1000.0 * n as f64 / wall_clock_ms
        } else {
            0.0
        };

        Some(Self {
            endpoint: set.endpoint().to_string(),
            throughput_rps,
            mean_latency_ms,
            p95_latency_ms,
            samples: n,
            failed_requests: set.failed_count(),
        })
    }
}

/// Index of the `p`-quantile in an ascending-sorted slice of length `n`
///
/// `floor(n * p)`, clamped to the last valid index so the boundary where the
/// product lands on `n` can never read out of bounds.
fn percentile_index(n: usize, p: f64) -> usize {
    debug_assert!(n > 0);
    let idx = (n as f64 * p).floor() as usize;
    idx.min(n - 1)
}
