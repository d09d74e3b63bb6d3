//! CLI module for reviewgate
//!
//! # Commands
//!
//! - `serve` - Start the review-link server
//! - `weights` - Check or auto-fill a platform weight distribution
//! - `businesses` - List businesses seeded from a config file
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! reviewgate serve
//!
//! # Is 50/30/25 a valid split?
//! reviewgate weights check 50 30 25
//!
//! # Generate shell completions
//! reviewgate completions bash > ~/.bash_completion.d/reviewgate
//! ```

pub mod businesses;
pub mod completions;
pub mod config;
pub mod output;
pub mod serve;
pub mod weights;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::routing::DEFAULT_AUTO_FILL_SLOT;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// reviewgate - send happy customers to review platforms, keep the rest private
#[derive(Parser, Debug)]
#[command(
    name = "reviewgate",
    version,
    about = "Review-link router with weighted platform rotation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Platform weight utilities
    #[command(subcommand)]
    Weights(WeightsCommands),
    /// List businesses declared in a config file
    Businesses(BusinessesArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "reviewgate.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "REVIEWGATE_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "REVIEWGATE_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "REVIEWGATE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Override the public base URL used in review links
    #[arg(long, env = "REVIEWGATE_BASE_URL")]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum WeightsCommands {
    /// Validate a weight list (each 0-100, total exactly 100)
    Check(WeightsCheckArgs),
    /// Fill one slot with whatever the others leave of 100
    Fill(WeightsFillArgs),
}

#[derive(Args, Debug)]
pub struct WeightsCheckArgs {
    /// Weights in platform order
    #[arg(required = true)]
    pub weights: Vec<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct WeightsFillArgs {
    /// Weights in platform order
    #[arg(required = true)]
    pub weights: Vec<u32>,

    /// Zero-based slot to auto-fill
    #[arg(short, long, default_value_t = DEFAULT_AUTO_FILL_SLOT)]
    pub slot: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct BusinessesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "reviewgate.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "reviewgate.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
