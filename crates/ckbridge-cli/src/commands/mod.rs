//! CLI command definitions and dispatch.

pub mod config;
pub mod convert;
pub mod project;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::output::OutputFormat;
use ckbridge_core::{BridgeConfig, BridgeResult, CkCmd};

/// ckbridge: drive the ck-cmd asset conversion toolchain
#[derive(Debug, Parser)]
#[command(name = "ckbridge", version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Conversions
    #[command(flatten)]
    Convert(convert::ConvertCommand),
    /// Project management
    Project(project::ProjectArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &BridgeConfig) -> BridgeResult<()> {
        match &self.command {
            Commands::Convert(command) => {
                let ck = CkCmd::from_config(config);
                debug!(tools = ?ck.tools(), "Resolved toolchain");
                convert::execute(command, &ck, self.format).await
            }
            Commands::Project(args) => project::execute(args, config, self.format).await,
            Commands::Config(args) => config::execute(args, config, self.format),
        }
    }
}
