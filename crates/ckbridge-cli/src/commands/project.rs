//! Project management CLI commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use dialoguer::Confirm;
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use super::convert;
use crate::output::{self, OutputFormat, Status};
use ckbridge_core::project::{self as core_project, is_project};
use ckbridge_core::{
    BridgeConfig, BridgeError, BridgeResult, CkCmd, MetadataKey, Project, RecentProjects,
};

/// Arguments for project commands
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Project directory, or any directory inside a project
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Project subcommand
    #[command(subcommand)]
    pub command: ProjectCommand,
}

/// Project subcommands
#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Create a project layout in the directory
    Init {
        /// Actor name used for the data folders
        #[arg(short, long)]
        name: String,
        /// Reset an existing project without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the project metadata
    Show,
    /// Print one metadata value
    Get {
        /// Metadata key as stored in metadata.json
        key: String,
    },
    /// Set one metadata value
    Set {
        /// Metadata key as stored in metadata.json
        key: String,
        /// New value
        value: String,
    },
    /// List recently used projects
    Recent,
    /// Import an fbx animation using the project's export settings
    ImportAnimation {
        /// Animation fbx file
        fbx: String,
    },
}

/// One metadata entry
#[derive(Debug, Serialize, Tabled)]
pub struct MetadataRow {
    /// Stored key
    pub key: String,
    /// Value, empty when unset
    pub value: String,
}

/// One stored metadata value, as printed by `get` and `set`
#[derive(Debug, Serialize)]
pub struct MetadataEntry {
    /// Stored key
    pub key: String,
    /// Stored value, `None` when unset
    pub value: Option<Value>,
    /// Whether the key is one of the well-known keys
    pub known: bool,
}

impl MetadataEntry {
    fn read(project: &Project, key: &str) -> BridgeResult<Self> {
        Ok(Self {
            key: key.to_string(),
            value: project.value(key)?,
            known: MetadataKey::from_name(key).is_some(),
        })
    }
}

/// One recent project
#[derive(Debug, Serialize, Tabled)]
pub struct RecentRow {
    /// Position in the list, most recent first
    pub position: usize,
    /// Project directory
    pub directory: String,
}

/// Execute project commands
pub async fn execute(
    args: &ProjectArgs,
    config: &BridgeConfig,
    format: OutputFormat,
) -> BridgeResult<()> {
    let recent = RecentProjects::default();

    match &args.command {
        ProjectCommand::Init { name, yes } => {
            if is_project(&args.dir) && !yes && !confirm_reset(&args.dir)? {
                output::print_status(Status::Warning, "Project left unchanged", format);
                return Ok(());
            }
            let project = Project::create(&args.dir, name)?;
            recent.add(project.directory())?;
            output::print_status(Status::Ok, &format!("Created {}", project), format);
        }
        ProjectCommand::Show => {
            let project = find_project(&args.dir)?;
            recent.add(project.directory())?;
            let rows = metadata_rows(&project)?;
            if format == OutputFormat::Table {
                output::print_kv("Project", project.directory());
            }
            output::print_list(&rows, format);
        }
        ProjectCommand::Get { key } => {
            let entry = MetadataEntry::read(&find_project(&args.dir)?, key)?;
            match (format, &entry.value) {
                (OutputFormat::Json, _) => output::print_item(&entry, format),
                (OutputFormat::Table, Some(Value::String(text))) => println!("{}", text),
                (OutputFormat::Table, Some(other)) => println!("{}", other),
                (OutputFormat::Table, None) => output::print_status(
                    Status::Warning,
                    &format!("'{}' is not set", key),
                    format,
                ),
            }
        }
        ProjectCommand::Set { key, value } => {
            let project = find_project(&args.dir)?;
            project.set_value(key, Value::String(value.clone()))?;
            let entry = MetadataEntry::read(&project, key)?;
            match format {
                OutputFormat::Json => output::print_item(&entry, format),
                OutputFormat::Table => {
                    if !entry.known {
                        output::print_status(
                            Status::Warning,
                            &format!("'{}' is not a known metadata key", key),
                            format,
                        );
                    }
                    let stored = entry.value.unwrap_or_default();
                    output::print_status(Status::Ok, &format!("{} = {}", key, stored), format);
                }
            }
        }
        ProjectCommand::Recent => {
            let rows: Vec<RecentRow> = recent
                .load()?
                .into_iter()
                .enumerate()
                .map(|(i, directory)| RecentRow {
                    position: i + 1,
                    directory,
                })
                .collect();
            output::print_list(&rows, format);
        }
        ProjectCommand::ImportAnimation { fbx } => {
            let project = find_project(&args.dir)?;
            let ck = CkCmd::from_config(config);
            let command = core_project::import_animation(&ck, &project, fbx).await?;
            convert::print_report(&convert::ConversionReport::ran(command), format);
        }
    }

    Ok(())
}

fn find_project(dir: &Path) -> BridgeResult<Project> {
    Project::find(dir).ok_or_else(|| BridgeError::NotAProject {
        path: dir.to_path_buf(),
    })
}

fn confirm_reset(dir: &Path) -> BridgeResult<bool> {
    Confirm::new()
        .with_prompt(format!(
            "{} is already a project. Reset its metadata?",
            dir.display()
        ))
        .default(false)
        .interact()
        .map_err(|e| BridgeError::Io(std::io::Error::other(e.to_string())))
}

fn metadata_rows(project: &Project) -> BridgeResult<Vec<MetadataRow>> {
    let mut rows = Vec::with_capacity(MetadataKey::ALL.len());
    for key in MetadataKey::ALL {
        rows.push(MetadataRow {
            key: key.as_str().to_string(),
            value: project.get(key)?,
        });
    }
    Ok(rows)
}
