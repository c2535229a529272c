//! Cotejar CLI - A/B endpoint load comparison
//!
//! Drives both endpoint strategies of the system under test with the
//! configured load, then writes the comparison artifacts and prints the
//! report.
//!
//! The benchmark constants (request count, concurrency, warm-up, cooldown)
//! are configuration-time values; only the environment-specific knobs are
//! exposed as flags.

use std::path::PathBuf;

use clap::Parser;

use cotejar::bench::{BenchmarkConfig, BenchmarkOrchestrator};
use cotejar::Result;

/// Cotejar - compare two HTTP endpoint strategies under identical load
#[derive(Parser)]
#[command(name = "cotejar")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the system under test
    #[arg(long, default_value = "http://localhost:8080")]
    base_url: String,

    /// Directory the comparison artifacts are written to
    #[arg(long, default_value = "load-test-results")]
    output_dir: PathBuf,

    /// Also print the report as JSON to stdout
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(err) = run(&Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = BenchmarkConfig::default()
        .with_base_url(cli.base_url.clone())
        .with_output_dir(cli.output_dir.clone());

    tracing::info!(
        requests = config.total_requests,
        concurrency = config.concurrency,
        base_url = %config.base_url,
        "starting load comparison"
    );

    let orchestrator = BenchmarkOrchestrator::new(config.clone())?;
    let report = orchestrator.execute()?;

    let path = report.write_to(&config.output_dir)?;

    println!("{}", report.render());
    if cli.json {
        println!("{}", report.to_json()?);
    }
    println!("Results written to {}", path.display());

    Ok(())
}
