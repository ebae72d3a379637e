//! Plane fitting from the command line.
//!
//! Reads a tab-separated point file, fits a plane with RANSAC and prints the
//! canonical `a\tb\tc\td` model line to stdout.
//!
//! # Usage
//!
//! - `plane-ransac input.txt` - Fit with the file's threshold
//! - `plane-ransac input.txt -o output.txt` - Also save the model line
//! - `plane-ransac input.txt --seed 7 -v` - Reproducible run with debug logging
//!
//! Logging goes to stderr and honors `RUST_LOG`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use plane_ransac::{Model, RansacConfig, estimate};
use plane_ransac_io::{load_input, save_model};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Fit a plane to a point cloud with RANSAC
#[derive(Debug, Parser)]
#[command(name = "plane-ransac")]
#[command(about = "Robust plane fitting for tab-separated point files", long_about = None)]
#[command(version)]
struct Cli {
    /// Point file: threshold line, count line, then X<TAB>Y<TAB>Z rows
    #[arg(name = "INPUT")]
    input: PathBuf,

    /// Also write the model line to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the threshold read from the input file
    #[arg(long)]
    threshold: Option<f64>,

    /// Fraction of points a plane must explain to be accepted
    #[arg(long, default_value_t = 0.5)]
    inlier_ratio: f64,

    /// Maximum number of trials
    #[arg(long, default_value_t = 1000)]
    max_iterations: usize,

    /// Sampling attempts allowed per trial
    #[arg(long, default_value_t = 100)]
    max_sampling_attempts: usize,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Build the estimator configuration for a file threshold.
    fn config(&self, file_threshold: f64) -> RansacConfig {
        let config = RansacConfig::new()
            .with_threshold(self.threshold.unwrap_or(file_threshold))
            .with_inlier_ratio(self.inlier_ratio)
            .with_max_iterations(self.max_iterations)
            .with_max_sampling_attempts(self.max_sampling_attempts);

        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "plane_ransac=info",
            1 => "plane_ransac=debug",
            _ => "plane_ransac=trace",
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let directive: Directive = cli
        .log_directive()
        .parse()
        .context("invalid log directive")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Load the input, fit a plane and optionally save the model.
fn run(cli: &Cli) -> Result<Model> {
    let input = load_input(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    info!(
        path = %cli.input.display(),
        points = input.points.len(),
        threshold = input.threshold,
        "Loaded point file"
    );

    let config = cli.config(input.threshold);
    let model = estimate(&input.points, &config)
        .with_context(|| format!("no plane fitted to {}", cli.input.display()))?;

    if let Some(output) = &cli.output {
        write_output(&model, output)?;
    }

    Ok(model)
}

fn write_output(model: &Model, path: &Path) -> Result<()> {
    save_model(model, path).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Saved model");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let model = run(&cli)?;
    println!("{}", model.to_canonical_string());

    Ok(())
}
