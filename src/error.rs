//! Error types for the benchmark harness
//!
//! A single crate-wide error enum plus a `Result` alias, re-exported from the
//! crate root. Fatal conditions (configuration rejection, unreachable system
//! under test, pool shutdown deadline, artifact write failure) surface here.
//! Per-request failures never do; they are recorded as failed samples.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, CotejarError>;

/// Errors produced by the benchmark harness
#[derive(Debug, Error)]
pub enum CotejarError {
    /// Network-level failure outside a measured request (preflight, warm-up)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Configuration rejected before any traffic was sent
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected
        reason: String,
    },

    /// Worker pool failed to drain within the shutdown deadline
    #[error("Worker pool shutdown timed out after {timeout_secs}s ({completed} of {expected} workers finished)")]
    ShutdownTimeout {
        /// Deadline that was exceeded, in seconds
        timeout_secs: u64,
        /// Workers that finished before the deadline
        completed: usize,
        /// Workers the run was waiting on
        expected: usize,
    },

    /// Filesystem failure while persisting the comparison artifacts
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
