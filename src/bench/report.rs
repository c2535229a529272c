//! Comparison report generation
//!
//! Takes the two run summaries (A = baseline, B = challenger), computes the
//! "B vs A" percentage deltas, states the per-axis winners independently, and
//! derives a recommendation from a four-cell decision table over the delta
//! signs. Rendering is pure; persistence is a separate, fallible step.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bench::{BenchmarkConfig, RunSummary};
use crate::error::Result;

/// Percentage deltas between the two runs, endpoint B relative to A
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Deltas {
    /// Throughput delta in percent
    pub throughput_pct: f64,
    /// Mean latency delta in percent
    pub mean_latency_pct: f64,
    /// p95 latency delta in percent
    pub p95_latency_pct: f64,
}

impl Deltas {
    /// `(B - A) / A * 100` for each metric
    #[must_use]
    pub fn between(a: &RunSummary, b: &RunSummary) -> Self {
        Self {
            throughput_pct: pct_delta(a.throughput_rps, b.throughput_rps),
            mean_latency_pct: pct_delta(a.mean_latency_ms, b.mean_latency_ms),
            p95_latency_pct: pct_delta(a.p95_latency_ms, b.p95_latency_ms),
        }
    }
}

/// Percentage change from `a` to `b`; zero when the baseline is degenerate
fn pct_delta(a: f64, b: f64) -> f64 {
    if a == 0.0 {
        0.0
    } else {
        (b - a) / a * 100.0
    }
}

/// Per-axis winners, stated independently (they may disagree)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conclusion {
    /// Endpoint with the higher throughput
    pub higher_throughput: String,
    /// Endpoint with the lower mean latency
    pub lower_mean_latency: String,
}

/// Recommendation derived from the dominance decision table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// One endpoint wins both throughput and mean latency
    Dominant {
        /// The recommended endpoint
        endpoint: String,
    },
    /// Split decision: each axis has a different winner
    TradeOff {
        /// Endpoint winning on throughput
        throughput_winner: String,
        /// Endpoint winning on mean latency
        latency_winner: String,
    },
}

impl Recommendation {
    /// Decision table over the delta sign pair
    ///
    /// Axes: does B win throughput (`B.throughput >= A.throughput`) and does
    /// B win mean latency (`B.mean <= A.mean`). Both true recommends B, both
    /// false recommends A, mixed is a trade-off. Exact ties resolve toward B,
    /// keeping all four cells exhaustive and deterministic.
    #[must_use]
    pub fn decide(a: &RunSummary, b: &RunSummary) -> Self {
        let b_wins_throughput = b.throughput_rps >= a.throughput_rps;
        let b_wins_latency = b.mean_latency_ms <= a.mean_latency_ms;
        match (b_wins_throughput, b_wins_latency) {
            (true, true) => Self::Dominant {
                endpoint: b.endpoint.clone(),
            },
            (false, false) => Self::Dominant {
                endpoint: a.endpoint.clone(),
            },
            (true, false) => Self::TradeOff {
                throughput_winner: b.endpoint.clone(),
                latency_winner: a.endpoint.clone(),
            },
            (false, true) => Self::TradeOff {
                throughput_winner: a.endpoint.clone(),
                latency_winner: b.endpoint.clone(),
            },
        }
    }
}

/// Complete comparison of two runs, created once per orchestrated comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Requests issued per run
    pub total_requests: usize,
    /// Worker pool width
    pub concurrency: usize,
    /// Summary of the first (baseline) run
    pub endpoint_a: RunSummary,
    /// Summary of the second run
    pub endpoint_b: RunSummary,
    /// Percentage deltas, B vs A
    pub deltas: Deltas,
    /// Per-axis winners
    pub conclusion: Conclusion,
    /// Recommendation derived from the decision table
    pub recommendation: Recommendation,
}

impl ComparisonReport {
    /// Assemble the report from the two summaries
    #[must_use]
    pub fn new(config: &BenchmarkConfig, a: RunSummary, b: RunSummary) -> Self {
        let deltas = Deltas::between(&a, &b);
        // Same tie rule as the decision table: ties go to B.
        let conclusion = Conclusion {
            higher_throughput: if b.throughput_rps >= a.throughput_rps {
                b.endpoint.clone()
            } else {
                a.endpoint.clone()
            },
            lower_mean_latency: if b.mean_latency_ms <= a.mean_latency_ms {
                b.endpoint.clone()
            } else {
                a.endpoint.clone()
            },
        };
        let recommendation = Recommendation::decide(&a, &b);
        Self {
            total_requests: config.total_requests,
            concurrency: config.concurrency,
            endpoint_a: a,
            endpoint_b: b,
            deltas,
            conclusion,
            recommendation,
        }
    }

    /// Render the human-readable comparison text
    ///
    /// Pure: no side effects, deterministic in the report contents.
    #[must_use]
    pub fn render(&self) -> String {
        let a = &self.endpoint_a;
        let b = &self.endpoint_b;
        let mut out = String::new();

        let _ = writeln!(out, "Performance Comparison: {} vs {}", a.endpoint, b.endpoint);
        let _ = writeln!(out);
        let _ = writeln!(out, "Test Configuration:");
        let _ = writeln!(out, "- Requests: {}", self.total_requests);
        let _ = writeln!(out, "- Concurrency: {}", self.concurrency);

        for summary in [a, b] {
            let _ = writeln!(out);
            let _ = writeln!(out, "{} Endpoint:", summary.endpoint);
            let _ = writeln!(
                out,
                "- Requests per second: {:.2}",
                summary.throughput_rps
            );
            let _ = writeln!(
                out,
                "- Mean response time: {:.2} ms",
                summary.mean_latency_ms
            );
            let _ = writeln!(
                out,
                "- 95th percentile response time: {:.2} ms",
                summary.p95_latency_ms
            );
            let _ = writeln!(
                out,
                "- Failed requests: {} of {}",
                summary.failed_requests, summary.samples
            );
        }

        let vs = format!("({} vs {})", b.endpoint, a.endpoint);
        let _ = writeln!(out);
        let _ = writeln!(out, "Performance Difference:");
        let _ = writeln!(
            out,
            "- Requests per second: {:.2}% {vs}",
            self.deltas.throughput_pct
        );
        let _ = writeln!(
            out,
            "- Mean response time: {:.2}% {vs}",
            self.deltas.mean_latency_pct
        );
        let _ = writeln!(
            out,
            "- 95th percentile response time: {:.2}% {vs}",
            self.deltas.p95_latency_pct
        );

        let _ = writeln!(out);
        let _ = writeln!(out, "Conclusion:");
        let _ = writeln!(
            out,
            "The {} endpoint has higher throughput.",
            self.conclusion.higher_throughput
        );
        let _ = writeln!(
            out,
            "The {} endpoint has lower mean response time.",
            self.conclusion.lower_mean_latency
        );

        let _ = writeln!(out);
        let _ = writeln!(out, "Recommendation:");
        match &self.recommendation {
            Recommendation::Dominant { endpoint } => {
                let _ = writeln!(
                    out,
                    "The {endpoint} endpoint is recommended for better performance."
                );
            }
            Recommendation::TradeOff {
                throughput_winner,
                latency_winner,
            } => {
                let _ = writeln!(
                    out,
                    "Consider the trade-off between throughput and response time:"
                );
                let _ = writeln!(
                    out,
                    "- Use the {throughput_winner} endpoint if throughput is more important."
                );
                let _ = writeln!(
                    out,
                    "- Use the {latency_winner} endpoint if response time is more important."
                );
            }
        }

        out
    }

    /// Serialize the report to pretty JSON
    ///
    /// # Errors
    /// Returns `Serialization` if the report cannot be encoded.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Persist the rendered text and JSON artifacts under `dir`
    ///
    /// Creates the directory if absent. Returns the path of the text
    /// artifact.
    ///
    /// # Errors
    /// Any filesystem failure is fatal; no partial artifact is left behind
    /// deliberately.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let text_path = dir.join("comparison.txt");
        fs::write(&text_path, self.render())?;
        fs::write(dir.join("comparison.json"), self.to_json()?)?;
        Ok(text_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(endpoint: &str, rps: f64, mean: f64, p95: f64) -> RunSummary {
        RunSummary {
            endpoint: endpoint.to_string(),
            throughput_rps: rps,
            mean_latency_ms: mean,
            p95_latency_ms: p95,
            samples: 1000,
            failed_requests: 0,
        }
    }

    fn report(a: RunSummary, b: RunSummary) -> ComparisonReport {
        ComparisonReport::new(&BenchmarkConfig::default(), a, b)
    }

    // =========================================================================
    // Delta Tests
    // =========================================================================

    #[test]
    fn test_deltas_are_b_relative_to_a() {
        let a = summary("resultMap", 100.0, 20.0, 40.0);
        let b = summary("stream", 150.0, 15.0, 30.0);
        let deltas = Deltas::between(&a, &b);
        assert!((deltas.throughput_pct - 50.0).abs() < 1e-9);
        assert!((deltas.mean_latency_pct - -25.0).abs() < 1e-9);
        assert!((deltas.p95_latency_pct - -25.0).abs() < 1e-9);
    }

    #[test]
    fn test_deltas_degenerate_baseline() {
        let a = summary("resultMap", 0.0, 0.0, 0.0);
        let b = summary("stream", 10.0, 10.0, 10.0);
        let deltas = Deltas::between(&a, &b);
        assert_eq!(deltas.throughput_pct, 0.0);
        assert_eq!(deltas.mean_latency_pct, 0.0);
    }

    // =========================================================================
    // Decision Table Tests
    // =========================================================================

    #[test]
    fn test_decide_b_dominates() {
        let a = summary("resultMap", 100.0, 20.0, 40.0);
        let b = summary("stream", 120.0, 15.0, 30.0);
        assert_eq!(
            Recommendation::decide(&a, &b),
            Recommendation::Dominant {
                endpoint: "stream".to_string()
            }
        );
    }

    #[test]
    fn test_decide_a_dominates() {
        let a = summary("resultMap", 120.0, 15.0, 30.0);
        let b = summary("stream", 100.0, 20.0, 40.0);
        assert_eq!(
            Recommendation::decide(&a, &b),
            Recommendation::Dominant {
                endpoint: "resultMap".to_string()
            }
        );
    }

    #[test]
    fn test_decide_trade_off_b_throughput_a_latency() {
        let a = summary("resultMap", 100.0, 15.0, 30.0);
        let b = summary("stream", 120.0, 20.0, 40.0);
        assert_eq!(
            Recommendation::decide(&a, &b),
            Recommendation::TradeOff {
                throughput_winner: "stream".to_string(),
                latency_winner: "resultMap".to_string()
            }
        );
    }

    #[test]
    fn test_decide_trade_off_a_throughput_b_latency() {
        let a = summary("resultMap", 120.0, 20.0, 40.0);
        let b = summary("stream", 100.0, 15.0, 30.0);
        assert_eq!(
            Recommendation::decide(&a, &b),
            Recommendation::TradeOff {
                throughput_winner: "resultMap".to_string(),
                latency_winner: "stream".to_string()
            }
        );
    }

    #[test]
    fn test_decide_exact_tie_resolves_toward_b() {
        let a = summary("resultMap", 100.0, 20.0, 40.0);
        let b = summary("stream", 100.0, 20.0, 40.0);
        assert_eq!(
            Recommendation::decide(&a, &b),
            Recommendation::Dominant {
                endpoint: "stream".to_string()
            }
        );
    }

    #[test]
    fn test_decide_tie_on_one_axis_only() {
        // Equal throughput, B slower on latency -> trade-off, B keeps the
        // tied throughput axis.
        let a = summary("resultMap", 100.0, 15.0, 30.0);
        let b = summary("stream", 100.0, 20.0, 40.0);
        assert_eq!(
            Recommendation::decide(&a, &b),
            Recommendation::TradeOff {
                throughput_winner: "stream".to_string(),
                latency_winner: "resultMap".to_string()
            }
        );
    }

    // =========================================================================
    // Conclusion Tests
    // =========================================================================

    #[test]
    fn test_conclusion_axes_are_independent() {
        let a = summary("resultMap", 120.0, 15.0, 30.0);
        let b = summary("stream", 100.0, 10.0, 20.0);
        let report = report(a, b);
        assert_eq!(report.conclusion.higher_throughput, "resultMap");
        assert_eq!(report.conclusion.lower_mean_latency, "stream");
    }

    // =========================================================================
    // Rendering Tests
    // =========================================================================

    #[test]
    fn test_render_contains_all_sections() {
        let a = summary("resultMap", 100.0, 20.0, 40.0);
        let b = summary("stream", 150.0, 15.0, 30.0);
        let text = report(a, b).render();

        assert!(text.contains("Performance Comparison: resultMap vs stream"));
        assert!(text.contains("Test Configuration:"));
        assert!(text.contains("- Requests: 1000"));
        assert!(text.contains("- Concurrency: 10"));
        assert!(text.contains("resultMap Endpoint:"));
        assert!(text.contains("stream Endpoint:"));
        assert!(text.contains("Performance Difference:"));
        assert!(text.contains("(stream vs resultMap)"));
        assert!(text.contains("Conclusion:"));
        assert!(text.contains("Recommendation:"));
        assert!(text.contains("The stream endpoint is recommended"));
    }

    #[test]
    fn test_render_trade_off_names_both_winners() {
        let a = summary("resultMap", 100.0, 15.0, 30.0);
        let b = summary("stream", 120.0, 20.0, 40.0);
        let text = report(a, b).render();

        assert!(text.contains("Consider the trade-off"));
        assert!(text.contains("Use the stream endpoint if throughput is more important."));
        assert!(
            text.contains("Use the resultMap endpoint if response time is more important.")
        );
    }

    #[test]
    fn test_render_is_pure_and_deterministic() {
        let a = summary("resultMap", 100.0, 20.0, 40.0);
        let b = summary("stream", 150.0, 15.0, 30.0);
        let report = report(a, b);
        assert_eq!(report.render(), report.render());
    }

    // =========================================================================
    // Persistence Tests
    // =========================================================================

    #[test]
    fn test_write_to_creates_directory_and_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("load-test-results");

        let a = summary("resultMap", 100.0, 20.0, 40.0);
        let b = summary("stream", 150.0, 15.0, 30.0);
        let path = report(a, b).write_to(&nested).unwrap();

        assert_eq!(path, nested.join("comparison.txt"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Performance Comparison"));

        let json = std::fs::read_to_string(nested.join("comparison.json")).unwrap();
        let parsed: ComparisonReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.endpoint_b.endpoint, "stream");
    }

    #[test]
    fn test_json_round_trip_preserves_recommendation() {
        let a = summary("resultMap", 100.0, 15.0, 30.0);
        let b = summary("stream", 120.0, 20.0, 40.0);
        let original = report(a, b);
        let parsed: ComparisonReport =
            serde_json::from_str(&original.to_json().unwrap()).unwrap();
        assert_eq!(parsed.recommendation, original.recommendation);
    }
}
