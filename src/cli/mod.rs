//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "advisor")]
#[command(author, version, about = "Stock advisory signal engine")]
pub struct Cli {
    /// Configuration file path (defaults and ADVISOR__* variables when omitted)
    #[arg(short, long, env = "ADVISOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configured one
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse one or more symbols and rank the recommendations
    Analyze(AnalyzeArgs),
    /// Run the Monte Carlo price-range simulation for one symbol
    Simulate(SimulateArgs),
    /// Run the sequence forecaster for one symbol
    Forecast(ForecastArgs),
    /// Validate configuration
    ValidateConfig(ValidateArgs),
}

/// Where bars come from and how much of them.
#[derive(clap::Args)]
pub struct DataArgs {
    /// Directory of <SYMBOL>.csv or <SYMBOL>_<interval>.csv files
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Exchange whose ticker suffix is appended (LSE, NSE, BSE, HKEX, CRYPTO, ...)
    #[arg(short, long)]
    pub exchange: Option<String>,

    /// Lookup period (5d, 1mo, 6mo, 1y, 5y, max)
    #[arg(long)]
    pub period: Option<String>,

    /// Bar interval (1d, 1wk, 1mo, 60m, ...)
    #[arg(long)]
    pub interval: Option<String>,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Symbols to analyse (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',', required = true)]
    pub symbols: Vec<String>,

    #[command(flatten)]
    pub data: DataArgs,

    /// Risk tolerance for stop-loss / take-profit levels
    #[arg(short, long)]
    pub risk_tolerance: Option<f64>,

    /// JSON file mapping symbols to headline polarity scores
    #[arg(long)]
    pub sentiment: Option<PathBuf>,

    /// Seed for reproducible simulations
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the Monte Carlo simulation
    #[arg(long)]
    pub no_simulation: bool,

    /// Skip the sequence forecast
    #[arg(long)]
    pub no_forecast: bool,

    /// Maximum symbols analysed at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,

    /// Save the JSON report to file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Symbol to simulate
    #[arg(short = 'S', long)]
    pub symbol: String,

    #[command(flatten)]
    pub data: DataArgs,

    /// Horizon in trading days
    #[arg(long)]
    pub days: Option<usize>,

    /// Number of simulated paths
    #[arg(long)]
    pub simulations: Option<usize>,

    /// Seed for reproducible results
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Symbol to forecast
    #[arg(short = 'S', long)]
    pub symbol: String,

    #[command(flatten)]
    pub data: DataArgs,

    /// Closes per input window
    #[arg(long)]
    pub lookback: Option<usize>,

    /// Days to forecast
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Print the per-day chart points
    #[arg(long)]
    pub chart: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Print the effective configuration as TOML
    #[arg(long)]
    pub print: bool,
}
