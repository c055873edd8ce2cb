use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use trial_report::{AnalysisConfig, DEFAULT_INPUT_PATH, run_analysis};

/// Responder and survival summary for a clinical trial patient table
#[derive(Parser, Debug)]
#[command(name = "trial-report", version, about)]
struct Cli {
    /// CSV or Parquet file with one row per patient
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    path: PathBuf,

    /// JSON file overriding the age threshold, cancer type or group labels
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the full report, including patient identifiers, as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    info!("Analysing clinical trial data from {}", cli.path.display());
    let report = run_analysis(&cli.path, &config)
        .with_context(|| format!("Analysis of {} failed", cli.path.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    Ok(())
}
