//! Command line builders for the conversion tools.
//!
//! Every builder is a pure function: it formats one fixed sub-command
//! grammar and returns an [`Invocation`] holding the separator-normalized
//! command line plus the directory it has to run in. The token order and
//! the flag spellings are what the tools' argument parsers expect, so they
//! must not be reordered.

use std::path::Path;

use crate::config::ResolvedTools;
use crate::path::{legacy_output_name, normalize_separators, parent_directory};

/// A command line ready to hand to the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Normalized command line.
    pub command: String,
    /// Directory to run in, `None` to inherit the caller's.
    pub working_dir: Option<String>,
}

impl Invocation {
    fn new(command: CommandLine, working_dir: &str) -> Self {
        let working_dir = normalize_separators(working_dir);
        Self {
            command: command.build(),
            working_dir: (!working_dir.is_empty()).then_some(working_dir),
        }
    }

    fn without_working_dir(command: CommandLine) -> Self {
        Self {
            command: command.build(),
            working_dir: None,
        }
    }
}

/// Space-joined token list.
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Start a command line with a bare program path.
    pub fn program(path: &Path) -> Self {
        Self {
            tokens: vec![path.to_string_lossy().into_owned()],
        }
    }

    /// Start a command line with a double-quoted program path.
    pub fn quoted_program(path: &Path) -> Self {
        Self {
            tokens: vec![quote(&path.to_string_lossy())],
        }
    }

    /// Append a token as-is.
    pub fn arg(mut self, token: &str) -> Self {
        self.tokens.push(token.to_string());
        self
    }

    /// Append a double-quoted value.
    pub fn quoted(mut self, value: &str) -> Self {
        self.tokens.push(quote(value));
        self
    }

    /// Append `flag "value"`.
    pub fn flag(mut self, flag: &str, value: &str) -> Self {
        self.tokens.push(format!("{flag} {}", quote(value)));
        self
    }

    /// Append `flag="value"`.
    pub fn assign(mut self, flag: &str, value: &str) -> Self {
        self.tokens.push(format!("{flag}={}", quote(value)));
        self
    }

    /// Join the tokens and normalize separators.
    pub fn build(&self) -> String {
        normalize_separators(&self.tokens.join(" "))
    }
}

fn quote(value: &str) -> String {
    format!("\"{value}\"")
}

/// Arguments of `importanimation`.
#[derive(Debug, Clone, Default)]
pub struct ImportAnimation<'a> {
    /// Skeleton packfile.
    pub skeleton_hkx: &'a str,
    /// Animation fbx file or a directory of them.
    pub animation_fbx: &'a str,
    /// Output directory.
    pub output_dir: &'a str,
    /// Root motion cache file, empty for none.
    pub cache_file: &'a str,
    /// Behavior directory, empty for none.
    pub behavior_dir: &'a str,
}

/// Arguments of `exportrig`.
#[derive(Debug, Clone, Default)]
pub struct ExportRig<'a> {
    /// Skeleton packfile.
    pub skeleton_hkx: &'a str,
    /// Skeleton nif.
    pub skeleton_nif: &'a str,
    /// Output directory.
    pub output_dir: &'a str,
    /// Animation hkx file or directory, empty for none.
    pub animation_hkx: &'a str,
    /// Mesh nif file or directory, empty for none.
    pub mesh_nif: &'a str,
    /// Root motion cache file, empty for none.
    pub cache_file: &'a str,
    /// Behavior directory, empty for none.
    pub behavior_dir: &'a str,
}

/// `exportanimation`: hkx animations to fbx.
pub fn export_animation(
    tools: &ResolvedTools,
    skeleton_hkx: &str,
    animation_hkx: &str,
    output_dir: &str,
) -> Invocation {
    let command = CommandLine::program(&tools.ckcmd)
        .arg("exportanimation")
        .quoted(skeleton_hkx)
        .quoted(animation_hkx)
        .quoted(output_dir);
    Invocation::new(command, output_dir)
}

/// `importanimation`: fbx animations to hkx.
pub fn import_animation(tools: &ResolvedTools, args: &ImportAnimation<'_>) -> Invocation {
    let command = CommandLine::program(&tools.ckcmd)
        .arg("importanimation")
        .quoted(args.skeleton_hkx)
        .quoted(args.animation_fbx)
        .assign("--c", args.cache_file)
        .assign("--b", args.behavior_dir)
        .assign("--e", args.output_dir);
    Invocation::new(command, args.output_dir)
}

/// `exportrig`: hkx/nif rig to fbx.
pub fn export_rig(tools: &ResolvedTools, args: &ExportRig<'_>) -> Invocation {
    let command = CommandLine::program(&tools.ckcmd)
        .arg("exportrig")
        .quoted(args.skeleton_hkx)
        .quoted(args.skeleton_nif)
        .assign("--e", args.output_dir)
        .assign("--a", args.animation_hkx)
        .assign("--n", args.mesh_nif)
        .assign("--b", args.behavior_dir)
        .assign("--c", args.cache_file);
    Invocation::new(command, args.output_dir)
}

/// `importrig`: fbx skeleton to hkx.
///
/// The empty `-a ""` flag is always passed; ck-cmd's parser expects it.
pub fn import_rig(tools: &ResolvedTools, skeleton_fbx: &str, output_dir: &str) -> Invocation {
    let command = CommandLine::program(&tools.ckcmd)
        .arg("importrig")
        .quoted(skeleton_fbx)
        .flag("-a", "")
        .flag("-e", output_dir);
    Invocation::new(command, output_dir)
}

/// `importskin`: skinned fbx to nif.
pub fn import_skin(tools: &ResolvedTools, skin_fbx: &str, output_dir: &str) -> Invocation {
    let command = CommandLine::program(&tools.ckcmd)
        .arg("importskin")
        .quoted(skin_fbx)
        .quoted(output_dir);
    Invocation::new(command, output_dir)
}

/// `importfbx`: fbx model to nif.
pub fn import_model(tools: &ResolvedTools, fbx: &str, output_dir: &str) -> Invocation {
    let command = CommandLine::program(&tools.ckcmd)
        .arg("importfbx")
        .quoted(fbx)
        .quoted(output_dir);
    Invocation::new(command, output_dir)
}

/// `exportfbx`: nif model to fbx, optionally resolving textures.
pub fn export_model(
    tools: &ResolvedTools,
    nif: &str,
    output_dir: &str,
    textures_dir: Option<&str>,
) -> Invocation {
    let mut command = CommandLine::program(&tools.ckcmd)
        .arg("exportfbx")
        .quoted(nif)
        .flag("-e", output_dir);
    if let Some(textures) = textures_dir.filter(|t| !t.is_empty()) {
        command = command.flag("-t", textures);
    }
    Invocation::new(command, output_dir)
}

/// `convert` through ck-cmd: hkx packfile to xml.
///
/// Runs in the directory of `xml`, whatever the source directory is.
pub fn convert_hkx_to_xml(tools: &ResolvedTools, hkx: &str, xml: &str) -> Invocation {
    let command = CommandLine::program(&tools.ckcmd)
        .arg("convert")
        .quoted(hkx)
        .flag("-o", xml)
        .arg("-v:AMD64");
    Invocation::new(command, &parent_directory(xml))
}

/// `convert` through hkxcmd: xml to a 32-bit hkx packfile.
pub fn convert_xml_to_hkx(tools: &ResolvedTools, xml: &str, hkx: &str) -> Invocation {
    let command = CommandLine::quoted_program(&tools.hkxcmd)
        .arg("convert")
        .arg("-v:WIN32")
        .quoted(xml)
        .quoted(hkx);
    Invocation::new(command, &parent_directory(hkx))
}

/// Legacy behavior upgrade. Returns the invocation and the output file.
///
/// The converter takes bare, unquoted paths.
pub fn convert_legacy_behavior(tools: &ResolvedTools, hkx: &str) -> (Invocation, String) {
    let hkx = normalize_separators(hkx);
    let new_hkx = legacy_output_name(&hkx);
    let command = CommandLine::program(&tools.behavior_converter)
        .arg("--platformamd64")
        .arg(&hkx)
        .arg(&new_hkx);
    (Invocation::without_working_dir(command), new_hkx)
}
