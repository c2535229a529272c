//! Benchmark harness for endpoint strategy comparison
//!
//! Drives two functionally-equivalent HTTP endpoints under identical
//! concurrent load and reduces the observations into a comparison report.
//! Contains:
//! - `BenchmarkConfig` / `EndpointSpec` for run configuration
//! - `Sample` / `SampleSet` / `SampleCollector` for latency observations
//! - `RequestDriver` for executing one bounded-pool run
//! - `RunSummary` for per-run statistics
//! - `ComparisonReport` for deltas, conclusions and the recommendation
//! - `BenchmarkOrchestrator` for sequencing warm-up, runs and cooldown

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CotejarError, Result};

mod driver;
mod orchestrator;
mod report;
mod samples;
mod statistics;

pub use driver::RequestDriver;
pub use orchestrator::BenchmarkOrchestrator;
pub use report::{ComparisonReport, Conclusion, Deltas, Recommendation};
pub use samples::{Sample, SampleCollector, SampleSet};
pub use statistics::RunSummary;

// ============================================================================
// Endpoint addressing
// ============================================================================

/// One endpoint of the system under test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSpec {
    /// Display name used in summaries and the report
    pub name: String,
    /// Path relative to the base URL
    pub path: String,
}

impl EndpointSpec {
    /// Create an endpoint spec
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Absolute URL for this endpoint under `base_url`
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for one full comparison
///
/// The benchmark constants (request count, concurrency, warm-up count,
/// cooldown) are config-time values fixed for the duration of a run; only
/// the environment-specific fields (base URL, output directory) vary between
/// deployments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Requests issued per run
    pub total_requests: usize,
    /// Worker pool width
    pub concurrency: usize,
    /// Untimed requests issued against both endpoints before measuring
    pub warmup_requests: usize,
    /// Pause between the two runs
    pub cooldown: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Deadline for the worker pool to drain after the last unit of work
    pub shutdown_timeout: Duration,
    /// Base URL of the system under test
    pub base_url: String,
    /// First (baseline) endpoint
    pub endpoint_a: EndpointSpec,
    /// Second endpoint
    pub endpoint_b: EndpointSpec,
    /// Directory the comparison artifacts are written to
    pub output_dir: PathBuf,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            total_requests: 1000,
            concurrency: 10,
            warmup_requests: 10,
            cooldown: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            shutdown_timeout: Duration::from_secs(60),
            base_url: "http://localhost:8080".to_string(),
            endpoint_a: EndpointSpec::new("resultMap", "/api/processors/resultMap"),
            endpoint_b: EndpointSpec::new("stream", "/api/processors/stream"),
            output_dir: PathBuf::from("load-test-results"),
        }
    }
}

impl BenchmarkConfig {
    /// Set the number of requests per run
    #[must_use]
    pub fn with_total_requests(mut self, n: usize) -> Self {
        self.total_requests = n;
        self
    }

    /// Set the worker pool width
    #[must_use]
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    /// Set the number of warm-up requests
    #[must_use]
    pub fn with_warmup_requests(mut self, n: usize) -> Self {
        self.warmup_requests = n;
        self
    }

    /// Set the inter-run cooldown
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the pool shutdown deadline
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Set the base URL of the system under test
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set both endpoints
    #[must_use]
    pub fn with_endpoints(mut self, a: EndpointSpec, b: EndpointSpec) -> Self {
        self.endpoint_a = a;
        self.endpoint_b = b;
        self
    }

    /// Set the artifact output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Reject configurations that cannot produce a meaningful comparison
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.total_requests == 0 {
            return Err(invalid("total_requests must be at least 1"));
        }
        if self.concurrency == 0 {
            return Err(invalid("concurrency must be at least 1"));
        }
        if self.shutdown_timeout.is_zero() {
            return Err(invalid("shutdown_timeout must be non-zero"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(invalid("base_url must be an http(s) URL"));
        }
        if self.endpoint_a.name == self.endpoint_b.name {
            return Err(invalid("endpoints must have distinct names"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> CotejarError {
    CotejarError::InvalidConfiguration {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // EndpointSpec Tests
    // =========================================================================

    #[test]
    fn test_endpoint_url_joins_base_and_path() {
        let ep = EndpointSpec::new("stream", "/api/processors/stream");
        assert_eq!(
            ep.url("http://localhost:8080"),
            "http://localhost:8080/api/processors/stream"
        );
    }

    #[test]
    fn test_endpoint_url_strips_trailing_slash() {
        let ep = EndpointSpec::new("resultMap", "/api/processors/resultMap");
        assert_eq!(
            ep.url("http://localhost:8080/"),
            "http://localhost:8080/api/processors/resultMap"
        );
    }

    // =========================================================================
    // BenchmarkConfig Tests
    // =========================================================================

    #[test]
    fn test_config_defaults() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.total_requests, 1000);
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.warmup_requests, 10);
        assert_eq!(config.cooldown, Duration::from_secs(5));
        assert_eq!(config.endpoint_a.name, "resultMap");
        assert_eq!(config.endpoint_b.name, "stream");
        assert_eq!(config.output_dir, PathBuf::from("load-test-results"));
    }

    #[test]
    fn test_config_builders() {
        let config = BenchmarkConfig::default()
            .with_total_requests(100)
            .with_concurrency(5)
            .with_warmup_requests(2)
            .with_cooldown(Duration::ZERO)
            .with_base_url("http://127.0.0.1:9999");
        assert_eq!(config.total_requests, 100);
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.warmup_requests, 2);
        assert!(config.cooldown.is_zero());
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_config_default_is_valid() {
        assert!(BenchmarkConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_requests() {
        let config = BenchmarkConfig::default().with_total_requests(0);
        assert!(matches!(
            config.validate(),
            Err(CotejarError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_config_rejects_zero_concurrency() {
        let config = BenchmarkConfig::default().with_concurrency(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_non_http_base_url() {
        let config = BenchmarkConfig::default().with_base_url("localhost:8080");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_duplicate_endpoint_names() {
        let config = BenchmarkConfig::default().with_endpoints(
            EndpointSpec::new("same", "/a"),
            EndpointSpec::new("same", "/b"),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = BenchmarkConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: BenchmarkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_requests, config.total_requests);
        assert_eq!(parsed.endpoint_b, config.endpoint_b);
    }
}
