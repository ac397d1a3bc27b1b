//! Command line interface for `fxgym`.
//!
//! Supports two output modes: human-readable tables (default) and JSON (--json).

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tabled::{Table, Tabled};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::PriceSeries;
use crate::error::{FxError, Result};
use crate::rl::agent::{
    run_episode, AlternatePolicy, AlwaysSellPolicy, BuyAndHoldPolicy, EpisodeSummary, Policy,
    RandomPolicy,
};
use crate::rl::environment::{ForexEnvironment, ObservationSpace};

#[derive(Parser)]
#[command(name = "fxgym")]
#[command(version = "0.1.0")]
#[command(about = "Simulated forex trading environment for RL agents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory
    #[arg(short, long, default_value = "config", env = "FXGYM_CONFIG_DIR")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play one episode of a baseline policy over a price CSV
    Run {
        /// Price CSV with Open/High/Low/Close columns (defaults to data.path)
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Policy to play
        #[arg(short, long, value_enum, default_value_t = PolicyKind::Alternate)]
        policy: PolicyKind,
        /// Seed for the random policy
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the configured observation space
    Space {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    BuyAndHold,
    Alternate,
    Random,
    AlwaysSell,
}

impl PolicyKind {
    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            PolicyKind::BuyAndHold => Box::new(BuyAndHoldPolicy),
            PolicyKind::Alternate => Box::new(AlternatePolicy::default()),
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
            PolicyKind::AlwaysSell => Box::new(AlwaysSellPolicy),
        }
    }
}

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct SpaceRow {
    pub name: String,
    pub kind: String,
    pub window: usize,
    pub shape: String,
    pub bounds: String,
}

impl SpaceRow {
    pub fn rows(space: &ObservationSpace) -> Vec<Self> {
        space
            .inputs
            .iter()
            .map(|input| SpaceRow {
                name: input.name.clone(),
                kind: input.kind.as_str().to_string(),
                window: input.window,
                shape: format!("{:?}", input.shape),
                bounds: format!("[{}, {}]", input.low, input.high),
            })
            .collect()
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct SummaryRow {
    pub metric: String,
    pub value: String,
}

impl SummaryRow {
    pub fn rows(summary: &EpisodeSummary) -> Vec<Self> {
        let row = |metric: &str, value: String| SummaryRow {
            metric: metric.to_string(),
            value,
        };
        vec![
            row("policy", summary.policy.clone()),
            row("steps", summary.steps.to_string()),
            row("trades", summary.number_of_trades.to_string()),
            row("total reward", format!("{:.6}", summary.total_reward)),
            row("starting balance", format!("{:.4}", summary.starting_balance)),
            row("final balance", format!("{:.4}", summary.final_balance)),
            row("return", format!("{:.3}%", summary.return_pct)),
            row("min balance", format!("{:.4}", summary.min_balance)),
            row("max balance", format!("{:.4}", summary.max_balance)),
        ]
    }
}

/// Print a vec of Tabled rows, or the serializable value as JSON.
pub fn print_output<T: Tabled, S: Serialize + ?Sized>(
    rows: &[T],
    value: &S,
    mode: OutputMode,
) -> Result<()> {
    match mode {
        OutputMode::Table => {
            if rows.is_empty() {
                println!("(no results)");
            } else {
                println!("{}", Table::new(rows));
            }
        }
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }
    Ok(())
}

/// Load the series, play one episode and print the summary
pub fn run_command(
    config: &AppConfig,
    data: Option<PathBuf>,
    policy: PolicyKind,
    seed: u64,
    mode: OutputMode,
) -> Result<EpisodeSummary> {
    let path = data
        .or_else(|| config.data.path.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            FxError::Validation("no price data given (--data or data.path)".to_string())
        })?;

    let series = PriceSeries::from_csv(&path)?;
    info!("Loaded {} rows from {}", series.len(), path.display());

    let mut env = ForexEnvironment::new(
        series,
        config.environment.clone(),
        config.broker.clone(),
    )?;
    let mut policy = policy.build(seed);

    let summary = run_episode(&mut env, policy.as_mut())?;
    print_output(&SummaryRow::rows(&summary), &summary, mode)?;
    Ok(summary)
}

/// Print the observation space implied by the configured windows
pub fn space_command(config: &AppConfig, mode: OutputMode) -> Result<()> {
    let space = ObservationSpace::from_windows(&config.environment.windows);
    print_output(&SpaceRow::rows(&space), &space, mode)
}
