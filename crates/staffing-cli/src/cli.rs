//! Clap derive structures for the `rvoip-staffing` CLI.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rvoip-staffing -- Erlang C staffing calculator for call centers
#[derive(Debug, Parser)]
#[command(
    name = "rvoip-staffing",
    version,
    about = "Compute call center staffing and service levels",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Engine configuration file (TOML)
    #[arg(long, short = 'c', env = "RVOIP_STAFFING_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Explicit log level (overrides -v)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Log span enter/exit events
    #[arg(long, global = true)]
    pub log_spans: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary (default)
    Text,
    /// One JSON document per interval
    Json,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Staff a single interval
    Calc(CalcArgs),
    /// Staff every interval of a scenario file
    Plan(PlanArgs),
}

#[derive(Debug, Args)]
pub struct CalcArgs {
    /// Calls expected in the interval
    #[arg(long)]
    pub calls: u64,

    /// Interval start (RFC 3339)
    #[arg(long, default_value = "2021-04-01T08:00:00Z")]
    pub start: DateTime<Utc>,

    /// Interval length in minutes
    #[arg(long, default_value_t = 60)]
    pub period_minutes: i64,

    /// Average handling time in seconds
    #[arg(long)]
    pub aht: f64,

    /// Target service level, 0 to 1
    #[arg(long, default_value_t = 0.8)]
    pub target_service_level: f64,

    /// Target answer time in seconds
    #[arg(long, default_value_t = 20.0)]
    pub target_answer_time: f64,

    /// Shrinkage, 0 to <1 (overrides config)
    #[arg(long)]
    pub shrinkage: Option<f64>,

    /// Average caller patience in seconds (overrides config)
    #[arg(long)]
    pub patience: Option<f64>,

    /// Search iteration cap (overrides config)
    #[arg(long, conflicts_with = "unbounded")]
    pub max_iterations: Option<u32>,

    /// Search without an iteration cap
    #[arg(long)]
    pub unbounded: bool,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Scenario file (TOML) with a target and intervals
    pub scenario: PathBuf,

    /// Print only the plan summary
    #[arg(long)]
    pub summary_only: bool,

    /// Search iteration cap (overrides scenario and config)
    #[arg(long, conflicts_with = "unbounded")]
    pub max_iterations: Option<u32>,

    /// Search without an iteration cap
    #[arg(long)]
    pub unbounded: bool,
}
