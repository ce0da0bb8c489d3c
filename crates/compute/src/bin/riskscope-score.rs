//! riskscope-score: one-shot batch scoring of a user activity CSV.
//!
//! Prints the scored results as JSON on stdout. Logs go to stderr.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use riskscope_compute::{RiskPipeline, RunOptions};
use riskscope_core::config::{load_dotenv, Config};
use riskscope_core::Dataset;
use riskscope_rules::{load_scoring_config, ScoringMode};

/// Score every user in a dataset and print risk results as JSON.
#[derive(Parser, Debug)]
#[command(name = "riskscope-score", version, about)]
struct Cli {
    /// Dataset CSV. Defaults to DATA_PATH from the environment.
    #[arg(long, env = "RISKSCOPE_DATA")]
    data: Option<PathBuf>,

    /// Scoring config YAML. Defaults to SCORING_CONFIG from the environment.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scorer override: "iforest" or "random".
    #[arg(long)]
    mode: Option<ScoringMode>,

    /// Seed override for the selected scorer.
    #[arg(long)]
    seed: Option<u64>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let cli = Cli::parse();
    let env_config = Config::from_env();

    let data_path = cli.data.unwrap_or(env_config.data.dataset_path);
    let config_path = cli.config.unwrap_or(env_config.data.scoring_config_path);

    let rule = load_scoring_config(&config_path)
        .with_context(|| format!("failed to load scoring config {}", config_path.display()))?;
    let dataset = Dataset::from_csv_path(&data_path)
        .with_context(|| format!("failed to load dataset {}", data_path.display()))?;

    let pipeline = RiskPipeline::new(rule.compile());
    let options = RunOptions {
        mode: cli.mode,
        seed: cli.seed,
    };
    info!(mode = %options.mode.unwrap_or(pipeline.config().mode), "scoring dataset");
    let results = pipeline.run(&dataset, &options).context("scoring failed")?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
