//! High level entry points: build one command, run it, return it.

use std::path::Path;

use tracing::info;

use crate::commands::{self, ExportRig, ImportAnimation, Invocation};
use crate::config::{BridgeConfig, ResolvedTools};
use crate::error::BridgeResult;
use crate::runner::CommandRunner;

/// The conversion toolchain bound to concrete executables.
#[derive(Debug, Clone)]
pub struct CkCmd {
    tools: ResolvedTools,
    runner: CommandRunner,
}

impl CkCmd {
    /// Create a toolchain from resolved paths and a runner.
    pub fn new(tools: ResolvedTools, runner: CommandRunner) -> Self {
        Self { tools, runner }
    }

    /// Resolve tools and build the runner from configuration.
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(
            config.tools.resolve(),
            CommandRunner::new(config.runner.clone()),
        )
    }

    /// The executables this toolchain calls.
    pub fn tools(&self) -> &ResolvedTools {
        &self.tools
    }

    async fn execute(&self, invocation: Invocation) -> BridgeResult<String> {
        self.runner
            .run(
                &invocation.command,
                invocation.working_dir.as_deref().map(Path::new),
            )
            .await?;
        Ok(invocation.command)
    }

    /// Convert hkx animations to fbx.
    pub async fn export_animation(
        &self,
        skeleton_hkx: &str,
        animation_hkx: &str,
        output_dir: &str,
    ) -> BridgeResult<String> {
        self.execute(commands::export_animation(
            &self.tools,
            skeleton_hkx,
            animation_hkx,
            output_dir,
        ))
        .await
    }

    /// Convert fbx animations to hkx.
    pub async fn import_animation(&self, args: &ImportAnimation<'_>) -> BridgeResult<String> {
        self.execute(commands::import_animation(&self.tools, args))
            .await
    }

    /// Convert an hkx/nif rig to fbx.
    pub async fn export_rig(&self, args: &ExportRig<'_>) -> BridgeResult<String> {
        self.execute(commands::export_rig(&self.tools, args)).await
    }

    /// Convert an fbx skeleton to hkx.
    pub async fn import_rig(&self, skeleton_fbx: &str, output_dir: &str) -> BridgeResult<String> {
        self.execute(commands::import_rig(&self.tools, skeleton_fbx, output_dir))
            .await
    }

    /// Convert a skinned fbx mesh to nif.
    pub async fn import_skin(&self, skin_fbx: &str, output_dir: &str) -> BridgeResult<String> {
        self.execute(commands::import_skin(&self.tools, skin_fbx, output_dir))
            .await
    }

    /// Convert an fbx model to nif.
    pub async fn import_model(&self, fbx: &str, output_dir: &str) -> BridgeResult<String> {
        self.execute(commands::import_model(&self.tools, fbx, output_dir))
            .await
    }

    /// Convert a nif model to fbx.
    pub async fn export_model(
        &self,
        nif: &str,
        output_dir: &str,
        textures_dir: Option<&str>,
    ) -> BridgeResult<String> {
        self.execute(commands::export_model(
            &self.tools,
            nif,
            output_dir,
            textures_dir,
        ))
        .await
    }

    /// Convert an hkx packfile to xml.
    pub async fn convert_hkx_to_xml(&self, hkx: &str, xml: &str) -> BridgeResult<String> {
        self.execute(commands::convert_hkx_to_xml(&self.tools, hkx, xml))
            .await
    }

    /// Convert an xml file to an hkx packfile.
    pub async fn convert_xml_to_hkx(&self, xml: &str, hkx: &str) -> BridgeResult<String> {
        self.execute(commands::convert_xml_to_hkx(&self.tools, xml, hkx))
            .await
    }

    /// Upgrade a legacy behavior file. Returns the path of the new file.
    pub async fn convert_legacy_behavior(&self, hkx: &str) -> BridgeResult<String> {
        let (invocation, new_hkx) = commands::convert_legacy_behavior(&self.tools, hkx);
        self.execute(invocation).await?;
        info!(output = %new_hkx, "Converted legacy behavior");
        Ok(new_hkx)
    }
}
