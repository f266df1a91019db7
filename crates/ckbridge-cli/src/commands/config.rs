//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat, Status};
use ckbridge_core::{BridgeConfig, BridgeResult, ResolvedTools};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Check that the configured executables exist
    Validate,
}

/// One configured executable
#[derive(Debug, Serialize, Tabled)]
pub struct ToolRow {
    /// Tool name
    pub tool: &'static str,
    /// Resolved location
    pub path: String,
    /// Whether the file exists
    pub found: bool,
}

/// Outcome of `config validate`
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// Every configured executable
    pub tools: Vec<ToolRow>,
    /// Effective command log file
    pub log_file: String,
    /// Number of executables not found
    pub missing: usize,
}

impl ValidationReport {
    fn new(config: &BridgeConfig) -> Self {
        let tools = tool_rows(&config.tools.resolve());
        let missing = tools.iter().filter(|row| !row.found).count();
        Self {
            tools,
            log_file: config.runner.effective_log_file().display().to_string(),
            missing,
        }
    }
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &BridgeConfig, format: OutputFormat) -> BridgeResult<()> {
    match &args.command {
        ConfigCommand::Show => {
            output::print_item(config, format);
        }
        ConfigCommand::Validate => {
            let report = ValidationReport::new(config);
            match format {
                OutputFormat::Json => output::print_item(&report, format),
                OutputFormat::Table => {
                    output::print_list(&report.tools, format);
                    output::print_kv("log file", &report.log_file);
                    if report.missing == 0 {
                        output::print_status(Status::Ok, "All executables found", format);
                    } else {
                        output::print_status(
                            Status::Warning,
                            &format!("{} executable(s) missing", report.missing),
                            format,
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

fn tool_rows(tools: &ResolvedTools) -> Vec<ToolRow> {
    let missing = tools.missing();
    [
        ("ck-cmd", &tools.ckcmd),
        ("hkxcmd", &tools.hkxcmd),
        ("behavior converter", &tools.behavior_converter),
    ]
    .into_iter()
    .map(|(tool, path)| ToolRow {
        tool,
        path: path.display().to_string(),
        found: !missing.iter().any(|(name, _)| *name == tool),
    })
    .collect()
}
