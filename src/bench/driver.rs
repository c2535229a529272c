//! Bounded-pool request driver for a single benchmark run
//!
//! One run issues exactly `total_requests` GET calls across `concurrency`
//! worker threads. Workers claim units of work from a shared counter, record
//! one sample per call into the shared collector, and signal completion; the
//! driver blocks until every worker has drained or the shutdown deadline
//! passes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use tracing::warn;

use crate::bench::{BenchmarkConfig, EndpointSpec, Sample, SampleCollector, SampleSet};
use crate::error::{CotejarError, Result};
use crate::http_client::EndpointClient;

/// Executes one benchmark run against one endpoint
#[derive(Debug)]
pub struct RequestDriver {
    config: BenchmarkConfig,
}

impl RequestDriver {
    /// Create a driver for the given configuration
    #[must_use]
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    /// The configuration this driver runs with
    #[must_use]
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Execute the full request plan against `endpoint`
    ///
    /// Blocks until all planned requests have completed. Per-request failures
    /// (non-2xx, transport errors) are logged and recorded as failed samples;
    /// they never abort the run. The returned set always holds exactly
    /// `total_requests` samples.
    ///
    /// # Errors
    /// Returns `ShutdownTimeout` if the pool fails to drain within the
    /// configured deadline. No partial sample set is returned in that case.
    pub fn run(&self, endpoint: &EndpointSpec) -> Result<SampleSet> {
        let total = self.config.total_requests;
        // A pool wider than the request plan just parks idle workers; cap it.
        let workers = self.config.concurrency.clamp(1, total.max(1));
        let url = endpoint.url(&self.config.base_url);

        let client = Arc::new(EndpointClient::with_timeout(self.config.request_timeout));
        let collector = Arc::new(SampleCollector::with_capacity(total));
        let next_unit = Arc::new(AtomicUsize::new(0));
        let (done_tx, done_rx) = mpsc::channel();

        let run_start = Instant::now();
        for _ in 0..workers {
            let client = Arc::clone(&client);
            let collector = Arc::clone(&collector);
            let next_unit = Arc::clone(&next_unit);
            let done_tx = done_tx.clone();
            let url = url.clone();
            thread::spawn(move || {
                while next_unit.fetch_add(1, Ordering::SeqCst) < total {
                    collector.append(fetch_one(&client, &url));
                }
                let _ = done_tx.send(());
            });
        }
        drop(done_tx);

        // Await-all with a deadline; exceeding it is fatal, not a partial run.
        let deadline = Instant::now() + self.config.shutdown_timeout;
        for finished in 0..workers {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if done_rx.recv_timeout(remaining).is_err() {
                return Err(CotejarError::ShutdownTimeout {
                    timeout_secs: self.config.shutdown_timeout.as_secs(),
                    completed: finished,
                    expected: workers,
                });
            }
        }
        let wall_clock = run_start.elapsed();

        let samples = collector.take_all();
        debug_assert_eq!(samples.len(), total);
        Ok(SampleSet::new(endpoint.name.clone(), samples, wall_clock))
    }
}

/// Issue one request and turn the outcome into a sample
///
/// Latency spans dispatch to body receipt, or to the failure if the call
/// never completed. One attempt per unit of work, no retries.
fn fetch_one(client: &EndpointClient, url: &str) -> Sample {
    let start = Instant::now();
    match client.get(url) {
        Ok(outcome) => {
            let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
            if outcome.is_success() {
                Sample::ok(latency_ms)
            } else {
                warn!(status = %outcome.status, url, "request completed with non-success status");
                Sample::failed(latency_ms)
            }
        }
        Err(err) => {
            let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
            warn!(error = %err, url, "request failed at transport level");
            Sample::failed(latency_ms)
        }
    }
}
