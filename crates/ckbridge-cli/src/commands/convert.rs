//! Conversion commands, one per toolchain sub-command.

use clap::Subcommand;
use serde::Serialize;

use crate::output::{self, OutputFormat, Status};
use ckbridge_core::commands::{ExportRig, ImportAnimation};
use ckbridge_core::{BridgeResult, CkCmd};

/// Conversion subcommands
#[derive(Debug, Subcommand)]
pub enum ConvertCommand {
    /// Convert hkx animations to fbx
    ExportAnimation {
        /// Skeleton hkx file
        skeleton_hkx: String,
        /// Animation hkx file or directory
        animation_hkx: String,
        /// Output directory
        output_dir: String,
    },
    /// Convert fbx animations to hkx
    ImportAnimation {
        /// Skeleton hkx file
        skeleton_hkx: String,
        /// Animation fbx file or directory
        animation_fbx: String,
        /// Output directory
        output_dir: String,
        /// Root motion cache file
        #[arg(long, default_value = "")]
        cache: String,
        /// Behavior directory
        #[arg(long, default_value = "")]
        behaviors: String,
    },
    /// Convert an hkx/nif rig to fbx
    ExportRig {
        /// Skeleton hkx file
        skeleton_hkx: String,
        /// Skeleton nif file
        skeleton_nif: String,
        /// Output directory
        output_dir: String,
        /// Animation hkx file or directory
        #[arg(long, default_value = "")]
        animations: String,
        /// Mesh nif file or directory
        #[arg(long, default_value = "")]
        mesh: String,
        /// Root motion cache file
        #[arg(long, default_value = "")]
        cache: String,
        /// Behavior directory
        #[arg(long, default_value = "")]
        behaviors: String,
    },
    /// Convert an fbx skeleton to hkx
    ImportRig {
        /// Skeleton fbx file
        skeleton_fbx: String,
        /// Output directory
        output_dir: String,
    },
    /// Convert a skinned fbx mesh to nif
    ImportSkin {
        /// Skin fbx file
        skin_fbx: String,
        /// Output directory
        output_dir: String,
    },
    /// Convert an fbx model to nif
    ImportFbx {
        /// Model fbx file
        fbx: String,
        /// Output directory
        output_dir: String,
    },
    /// Convert a nif model to fbx
    ExportFbx {
        /// Model nif file
        nif: String,
        /// Output directory
        output_dir: String,
        /// Texture folder to resolve materials against
        #[arg(short, long)]
        textures: Option<String>,
    },
    /// Convert an hkx packfile to xml
    HkxToXml {
        /// Source hkx file
        hkx: String,
        /// Destination xml file
        xml: String,
    },
    /// Convert an xml file to an hkx packfile
    XmlToHkx {
        /// Source xml file
        xml: String,
        /// Destination hkx file
        hkx: String,
    },
    /// Upgrade a legacy behavior hkx
    ConvertLegacy {
        /// Legacy behavior hkx file
        hkx: String,
    },
}

/// What a conversion ran.
#[derive(Debug, Serialize)]
pub struct ConversionReport {
    /// The executed command line
    pub command: Option<String>,
    /// File produced, when the command has a single known output
    pub output: Option<String>,
}

/// Execute a conversion command
pub async fn execute(
    command: &ConvertCommand,
    ck: &CkCmd,
    format: OutputFormat,
) -> BridgeResult<()> {
    let report = match command {
        ConvertCommand::ExportAnimation {
            skeleton_hkx,
            animation_hkx,
            output_dir,
        } => {
            let ran = ck
                .export_animation(skeleton_hkx, animation_hkx, output_dir)
                .await?;
            ConversionReport::ran(ran)
        }
        ConvertCommand::ImportAnimation {
            skeleton_hkx,
            animation_fbx,
            output_dir,
            cache,
            behaviors,
        } => {
            let args = ImportAnimation {
                skeleton_hkx,
                animation_fbx,
                output_dir,
                cache_file: cache,
                behavior_dir: behaviors,
            };
            ConversionReport::ran(ck.import_animation(&args).await?)
        }
        ConvertCommand::ExportRig {
            skeleton_hkx,
            skeleton_nif,
            output_dir,
            animations,
            mesh,
            cache,
            behaviors,
        } => {
            let args = ExportRig {
                skeleton_hkx,
                skeleton_nif,
                output_dir,
                animation_hkx: animations,
                mesh_nif: mesh,
                cache_file: cache,
                behavior_dir: behaviors,
            };
            ConversionReport::ran(ck.export_rig(&args).await?)
        }
        ConvertCommand::ImportRig {
            skeleton_fbx,
            output_dir,
        } => ConversionReport::ran(ck.import_rig(skeleton_fbx, output_dir).await?),
        ConvertCommand::ImportSkin {
            skin_fbx,
            output_dir,
        } => ConversionReport::ran(ck.import_skin(skin_fbx, output_dir).await?),
        ConvertCommand::ImportFbx { fbx, output_dir } => {
            ConversionReport::ran(ck.import_model(fbx, output_dir).await?)
        }
        ConvertCommand::ExportFbx {
            nif,
            output_dir,
            textures,
        } => {
            let ran = ck
                .export_model(nif, output_dir, textures.as_deref())
                .await?;
            ConversionReport::ran(ran)
        }
        ConvertCommand::HkxToXml { hkx, xml } => ConversionReport {
            command: Some(ck.convert_hkx_to_xml(hkx, xml).await?),
            output: Some(xml.clone()),
        },
        ConvertCommand::XmlToHkx { xml, hkx } => ConversionReport {
            command: Some(ck.convert_xml_to_hkx(xml, hkx).await?),
            output: Some(hkx.clone()),
        },
        ConvertCommand::ConvertLegacy { hkx } => ConversionReport {
            command: None,
            output: Some(ck.convert_legacy_behavior(hkx).await?),
        },
    };

    print_report(&report, format);
    Ok(())
}

impl ConversionReport {
    /// Report for a command without a single known output file.
    pub fn ran(command: String) -> Self {
        Self {
            command: Some(command),
            output: None,
        }
    }
}

/// Print a conversion report in the selected format
pub fn print_report(report: &ConversionReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_item(report, format),
        OutputFormat::Table => {
            output::print_status(Status::Ok, "Conversion finished", format);
            if let Some(command) = &report.command {
                output::print_kv("Command", command);
            }
            if let Some(path) = &report.output {
                output::print_kv("Output", path);
            }
        }
    }
}
