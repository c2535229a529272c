//! Benchmark orchestration
//!
//! Sequences the full comparison: preflight reachability probe, warm-up
//! against both endpoints, the first timed run, an inter-run cooldown, the
//! second timed run, then report assembly. Runs are never concurrent with
//! each other, and partial results are never reported.

use std::thread;

use tracing::{info, warn};

use crate::bench::{
    BenchmarkConfig, ComparisonReport, RequestDriver, RunSummary, SampleSet,
};
use crate::error::{CotejarError, Result};
use crate::http_client::EndpointClient;

/// Sequences warm-up, the two timed runs and report assembly
#[derive(Debug)]
pub struct BenchmarkOrchestrator {
    config: BenchmarkConfig,
}

impl BenchmarkOrchestrator {
    /// Create an orchestrator for a validated configuration
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` before any traffic is sent.
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this orchestrator runs with
    #[must_use]
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Execute the full comparison
    ///
    /// # Errors
    /// An unreachable system under test (preflight or warm-up), a pool
    /// shutdown timeout, or an empty run aborts the whole comparison; no
    /// partial report is produced.
    pub fn execute(&self) -> Result<ComparisonReport> {
        let client = EndpointClient::with_timeout(self.config.request_timeout);
        self.preflight(&client)?;
        self.warm_up(&client)?;

        let driver = RequestDriver::new(self.config.clone());

        info!(endpoint = %self.config.endpoint_a.name, "starting first timed run");
        let summary_a = summarize(driver.run(&self.config.endpoint_a)?)?;

        info!(
            cooldown_secs = self.config.cooldown.as_secs_f64(),
            "cooling down between runs"
        );
        thread::sleep(self.config.cooldown);

        info!(endpoint = %self.config.endpoint_b.name, "starting second timed run");
        let summary_b = summarize(driver.run(&self.config.endpoint_b)?)?;

        Ok(ComparisonReport::new(&self.config, summary_a, summary_b))
    }

    /// Probe both endpoints before sending any load
    ///
    /// A reachable endpoint answering non-2xx is only warned about; requests
    /// against it still get measured. Unreachable is fatal.
    fn preflight(&self, client: &EndpointClient) -> Result<()> {
        for endpoint in [&self.config.endpoint_a, &self.config.endpoint_b] {
            let url = endpoint.url(&self.config.base_url);
            if !client.health_check(&url)? {
                warn!(endpoint = %endpoint.name, "endpoint reachable but not answering 2xx");
            }
        }
        Ok(())
    }

    /// Issue the warm-up traffic against both endpoints
    ///
    /// Timings are discarded; these requests never enter any sample set. A
    /// transport failure here aborts the comparison.
    fn warm_up(&self, client: &EndpointClient) -> Result<()> {
        info!(count = self.config.warmup_requests, "warming up both endpoints");
        let url_a = self.config.endpoint_a.url(&self.config.base_url);
        let url_b = self.config.endpoint_b.url(&self.config.base_url);
        for _ in 0..self.config.warmup_requests {
            client.get(&url_a)?;
            client.get(&url_b)?;
        }
        Ok(())
    }
}

/// Reduce a completed run, treating an empty set as a fatal condition
fn summarize(set: SampleSet) -> Result<RunSummary> {
    RunSummary::from_run(&set).ok_or_else(|| CotejarError::InvalidConfiguration {
        reason: format!("run against '{}' produced no samples", set.endpoint()),
    })
}
