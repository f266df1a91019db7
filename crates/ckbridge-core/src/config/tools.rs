//! External executable locations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory below the install dir that holds the executables.
const BIN_DIR: &str = "bin";

/// File name of the main conversion tool.
const CKCMD_EXE: &str = "ck-cmd.exe";

/// File name of the xml to hkx packer.
const HKXCMD_EXE: &str = "hkxcmd.exe";

/// File name of the legacy behavior converter.
const BEHAVIOR_CONVERTER_EXE: &str = "HavokBehaviorPostProcess.exe";

/// Configured executable locations.
///
/// Unset entries fall back to `<install_dir>/bin/<exe>`. When
/// `install_dir` is unset too, the directory of the running executable is
/// used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    /// Base directory of the toolchain installation.
    pub install_dir: Option<PathBuf>,
    /// Explicit path to `ck-cmd`.
    pub ckcmd: Option<PathBuf>,
    /// Explicit path to `hkxcmd`.
    pub hkxcmd: Option<PathBuf>,
    /// Explicit path to `HavokBehaviorPostProcess`.
    pub behavior_converter: Option<PathBuf>,
}

/// Concrete executable paths, resolved once and passed around explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTools {
    /// `ck-cmd` executable.
    pub ckcmd: PathBuf,
    /// `hkxcmd` executable.
    pub hkxcmd: PathBuf,
    /// `HavokBehaviorPostProcess` executable.
    pub behavior_converter: PathBuf,
}

impl ToolPaths {
    /// Resolve the effective install directory.
    pub fn effective_install_dir(&self) -> PathBuf {
        self.install_dir.clone().unwrap_or_else(default_install_dir)
    }

    /// Resolve all three executables.
    pub fn resolve(&self) -> ResolvedTools {
        let defaults = ResolvedTools::in_dir(&self.effective_install_dir());
        ResolvedTools {
            ckcmd: self.ckcmd.clone().unwrap_or(defaults.ckcmd),
            hkxcmd: self.hkxcmd.clone().unwrap_or(defaults.hkxcmd),
            behavior_converter: self
                .behavior_converter
                .clone()
                .unwrap_or(defaults.behavior_converter),
        }
    }
}

impl ResolvedTools {
    /// Standard layout below an install directory.
    pub fn in_dir(install_dir: &Path) -> Self {
        let bin = install_dir.join(BIN_DIR);
        Self {
            ckcmd: bin.join(CKCMD_EXE),
            hkxcmd: bin.join(HKXCMD_EXE),
            behavior_converter: bin.join(BEHAVIOR_CONVERTER_EXE),
        }
    }

    /// Named executables that do not exist on disk.
    pub fn missing(&self) -> Vec<(&'static str, &Path)> {
        [
            ("ck-cmd", self.ckcmd.as_path()),
            ("hkxcmd", self.hkxcmd.as_path()),
            ("behavior converter", self.behavior_converter.as_path()),
        ]
        .into_iter()
        .filter(|(_, path)| !path.exists())
        .collect()
    }
}

fn default_install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
