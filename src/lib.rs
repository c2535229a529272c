//! # Cotejar
//!
//! Cotejar (Spanish: "to collate, to compare side by side") benchmarks two
//! functionally-equivalent HTTP endpoints of a system under test under
//! identical concurrent load and renders a deterministic comparison report
//! with a recommendation.
//!
//! ## Features
//!
//! - **Bounded worker pool**: a fixed number of workers drive blocking GET
//!   requests, one sample per planned request, no retries
//! - **Deterministic statistics**: throughput over wall-clock duration, mean
//!   latency, and clamped index-based p95, bit-identical regardless of
//!   sample arrival order
//! - **Isolated runs**: warm-up traffic is discarded, runs are strictly
//!   sequential with a cooldown gap between them
//! - **Decision-table recommendation**: throughput and latency axes are
//!   judged independently and combined exhaustively
//!
//! ## Example
//!
//! ```rust,no_run
//! use cotejar::bench::{BenchmarkConfig, BenchmarkOrchestrator};
//!
//! # fn main() -> cotejar::Result<()> {
//! let config = BenchmarkConfig::default().with_base_url("http://localhost:8080");
//! let report = BenchmarkOrchestrator::new(config)?.execute()?;
//! println!("{}", report.render());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Clippy allows (MUST come after deny/warn to override them)
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)] // usize -> f64 for statistics is safe at benchmark scale
#![allow(clippy::cast_possible_truncation)] // percentile index fits usize by construction
#![allow(clippy::cast_sign_loss)] // floored non-negative quantile products
#![allow(clippy::must_use_candidate)] // Not all methods need #[must_use]
#![allow(clippy::missing_errors_doc)] // Error sections provided where they add information
#![allow(clippy::float_cmp)] // Exact float equality is intentional in determinism tests

/// Benchmark harness: configuration, driver, statistics, report, orchestration
pub mod bench;
pub mod error;
/// HTTP client for driving the system under test
pub mod http_client;
/// Deterministic test doubles (mock endpoints) for harness tests
pub mod testing;

// Re-exports for convenience
pub use error::{CotejarError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
