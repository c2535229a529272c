//! Latency samples and their thread-safe collection
//!
//! A `Sample` is one latency observation; a `SampleSet` is the completed,
//! read-only output of one run; a `SampleCollector` is the only mutable
//! state shared by the worker pool while a run is in flight.

use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A single latency observation for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Latency between dispatch and response receipt (or failure), in ms
    pub latency_ms: f64,
    /// Whether the request completed with a 2xx status
    pub success: bool,
}

impl Sample {
    /// Successful observation
    #[must_use]
    pub fn ok(latency_ms: f64) -> Self {
        Self {
            latency_ms,
            success: true,
        }
    }

    /// Failed observation (non-2xx or transport error), latency still measured
    #[must_use]
    pub fn failed(latency_ms: f64) -> Self {
        Self {
            latency_ms,
            success: false,
        }
    }
}

/// The samples produced by one run against one endpoint
///
/// Order is completion order, not submission order; no consumer may rely on
/// it. Size equals the planned request count: failed requests are recorded,
/// never dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSet {
    endpoint: String,
    samples: Vec<Sample>,
    wall_clock: Duration,
}

impl SampleSet {
    /// Assemble the read-only output of a completed run
    #[must_use]
    pub fn new(endpoint: impl Into<String>, samples: Vec<Sample>, wall_clock: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            samples,
            wall_clock,
        }
    }

    /// Endpoint the run targeted
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// All recorded samples
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of recorded samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the run recorded nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Wall-clock duration from first dispatch to last completion
    #[must_use]
    pub fn wall_clock(&self) -> Duration {
        self.wall_clock
    }

    /// Number of failed samples (non-2xx or transport error)
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.samples.iter().filter(|s| !s.success).count()
    }

    /// All latencies, successes and failures alike
    #[must_use]
    pub fn latencies_ms(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.latency_ms).collect()
    }
}

/// Append-only collector shared by the worker pool during a run
///
/// Serializes concurrent appends; appends are never lost or interleaved.
#[derive(Debug, Default)]
pub struct SampleCollector {
    inner: Mutex<Vec<Sample>>,
}

impl SampleCollector {
    /// Create a collector pre-sized for the planned request count
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Record one sample
    ///
    /// # Panics
    /// Panics if a worker previously panicked while holding the lock.
    pub fn append(&self, sample: Sample) {
        let mut samples = self.inner.lock().expect("sample collector lock poisoned");
        samples.push(sample);
    }

    /// Number of samples recorded so far
    ///
    /// # Panics
    /// Panics if a worker previously panicked while holding the lock.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("sample collector lock poisoned").len()
    }

    /// Whether nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain all recorded samples
    ///
    /// Called once by the driver after every worker has finished.
    ///
    /// # Panics
    /// Panics if a worker previously panicked while holding the lock.
    #[must_use]
    pub fn take_all(&self) -> Vec<Sample> {
        std::mem::take(&mut *self.inner.lock().expect("sample collector lock poisoned"))
    }
}
