//! End-to-end tests of the toolchain facade against stand-in executables.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use ckbridge_core::commands::{ExportRig, ImportAnimation};
use ckbridge_core::config::RunnerConfig;
use ckbridge_core::{BridgeError, CkCmd, CommandRunner, MetadataKey, Project, ResolvedTools};

/// Writes its arguments, one per line, to `args.txt` in the working directory.
const RECORDING_TOOL: &str = "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$PWD/args.txt\"\necho done\n";

/// Succeeds without touching the filesystem.
const QUIET_TOOL: &str = "#!/bin/sh\necho done\n";

/// Reports an internal error but exits with 0.
const SILENTLY_FAILING_TOOL: &str = "#!/bin/sh\necho 'System.Exception: invalid skeleton'\nexit 0\n";

struct Fixture {
    temp: tempfile::TempDir,
    ck: CkCmd,
}

impl Fixture {
    fn new(script: &str) -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let tools = ResolvedTools::in_dir(temp.path());
        std::fs::create_dir_all(temp.path().join("bin")).expect("mkdir bin");
        for tool in [&tools.ckcmd, &tools.hkxcmd, &tools.behavior_converter] {
            write_script(tool, script);
        }

        let runner = CommandRunner::new(RunnerConfig {
            log_file: Some(temp.path().join("run.log")),
            ..Default::default()
        });
        Self {
            ck: CkCmd::new(tools, runner),
            temp,
        }
    }

    fn dir(&self, name: &str) -> String {
        let dir = self.temp.path().join(name);
        std::fs::create_dir_all(&dir).expect("mkdir");
        dir.to_string_lossy().into_owned()
    }

    fn recorded_args(&self, dir: &str) -> Vec<String> {
        std::fs::read_to_string(Path::new(dir).join("args.txt"))
            .expect("args recorded")
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn write_script(path: &Path, script: &str) {
    std::fs::write(path, script).expect("write script");
    let mut perms = std::fs::metadata(path).expect("metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).expect("chmod");
}

#[tokio::test]
async fn test_import_rig_passes_empty_a_flag() {
    let fx = Fixture::new(RECORDING_TOOL);
    let out = fx.dir("out");

    let command = fx.ck.import_rig("S.fbx", &out).await.expect("import rig");

    assert!(command.contains(&format!("-a \"\" -e \"{out}\"")));
    assert_eq!(fx.recorded_args(&out), vec!["importrig", "S.fbx", "-a", "", "-e", out.as_str()]);
}

#[tokio::test]
async fn test_import_animation_flags_reach_tool() {
    let fx = Fixture::new(RECORDING_TOOL);
    let out = fx.dir("anims");

    fx.ck
        .import_animation(&ImportAnimation {
            skeleton_hkx: "skeleton.hkx",
            animation_fbx: "walk.fbx",
            output_dir: &out,
            cache_file: "cache.txt",
            ..Default::default()
        })
        .await
        .expect("import animation");

    assert_eq!(
        fx.recorded_args(&out),
        vec![
            "importanimation".to_string(),
            "skeleton.hkx".to_string(),
            "walk.fbx".to_string(),
            "--c=cache.txt".to_string(),
            "--b=".to_string(),
            format!("--e={out}"),
        ]
    );
}

#[tokio::test]
async fn test_export_rig_runs_in_output_dir() {
    let fx = Fixture::new(RECORDING_TOOL);
    let out = fx.dir("rig");

    fx.ck
        .export_rig(&ExportRig {
            skeleton_hkx: "skeleton.hkx",
            skeleton_nif: "skeleton.nif",
            output_dir: &out,
            ..Default::default()
        })
        .await
        .expect("export rig");

    let args = fx.recorded_args(&out);
    assert_eq!(args[0], "exportrig");
    assert_eq!(args.len(), 8);
}

#[tokio::test]
async fn test_hkx_to_xml_runs_in_destination_dir() {
    let fx = Fixture::new(RECORDING_TOOL);
    let source = fx.dir("source");
    let dest = fx.dir("dest");
    let xml = format!("{dest}/wolf.xml");

    fx.ck
        .convert_hkx_to_xml(&format!("{source}/wolf.hkx"), &xml)
        .await
        .expect("convert");

    assert!(Path::new(&dest).join("args.txt").exists());
    assert!(!Path::new(&source).join("args.txt").exists());
}

#[tokio::test]
async fn test_xml_to_hkx_uses_hkxcmd() {
    let fx = Fixture::new(RECORDING_TOOL);
    let out = fx.dir("out");

    let command = fx
        .ck
        .convert_xml_to_hkx("wolf.xml", &format!("{out}/wolf.hkx"))
        .await
        .expect("convert");

    assert!(command.starts_with(&format!("\"{}\"", fx.ck.tools().hkxcmd.display())));
    assert_eq!(fx.recorded_args(&out)[..2], ["convert", "-v:WIN32"]);
}

#[tokio::test]
async fn test_legacy_behavior_returns_new_path() {
    let fx = Fixture::new(QUIET_TOOL);
    let behaviors = fx.dir("behaviors");
    let hkx = format!("{behaviors}/0_master.hkx");

    let new_hkx = fx.ck.convert_legacy_behavior(&hkx).await.expect("convert");

    assert_eq!(new_hkx, format!("{behaviors}/0_master_new.hkx"));
}

#[tokio::test]
async fn test_exception_output_is_a_failure() {
    let fx = Fixture::new(SILENTLY_FAILING_TOOL);
    let out = fx.dir("out");

    let result = fx.ck.import_skin("skin.fbx", &out).await;

    match result {
        Err(err) => {
            assert!(err.is_command_failure());
            assert!(err.output().unwrap_or_default().contains("invalid skeleton"));
        }
        Ok(command) => panic!("expected failure for {command}"),
    }
}

#[tokio::test]
async fn test_missing_tool_is_a_failure() {
    let temp = tempfile::tempdir().expect("tempdir");
    let out = temp.path().join("out");
    std::fs::create_dir_all(&out).expect("mkdir");
    let ck = CkCmd::new(
        ResolvedTools::in_dir(&temp.path().join("not-installed")),
        CommandRunner::new(RunnerConfig {
            log_file: Some(temp.path().join("run.log")),
            ..Default::default()
        }),
    );

    let result = ck.import_model("chair.fbx", &out.to_string_lossy()).await;
    assert!(matches!(result, Err(BridgeError::CommandFailed { .. })));
}

#[tokio::test]
async fn test_project_import_animation_stages_data_files() {
    let fx = Fixture::new(RECORDING_TOOL);
    let project = Project::create(fx.temp.path().join("wolf"), "wolf").expect("project");
    let root = project.root().to_path_buf();

    std::fs::write(root.join("skeleton.hkx"), "").expect("write");
    std::fs::create_dir_all(root.join("animationdata")).expect("mkdir");
    std::fs::write(root.join("animationdata/wolf.txt"), "data").expect("write");

    project
        .set(MetadataKey::ExportSkeletonHkx, "skeleton.hkx")
        .expect("set");
    project
        .set(MetadataKey::ExportAnimationDir, "data/meshes/actors/wolf/animations")
        .expect("set");
    project
        .set(MetadataKey::ExportAnimationDataDir, "animationdata")
        .expect("set");

    let command = ckbridge_core::project::import_animation(&fx.ck, &project, "walk.fbx")
        .await
        .expect("import");

    assert!(command.contains("importanimation"));
    assert!(!root.join("wolf.txt").exists());
    assert!(root.join("animationdata/wolf.txt").exists());

    let out = root.join("data/meshes/actors/wolf/animations");
    let args = fx.recorded_args(&out.to_string_lossy());
    assert_eq!(args[1], root.join("skeleton.hkx").to_string_lossy());
    assert_eq!(args[3], "--c=");
}

#[tokio::test]
async fn test_project_import_animation_requires_skeleton() {
    let fx = Fixture::new(RECORDING_TOOL);
    let project = Project::create(fx.temp.path().join("wolf"), "wolf").expect("project");

    let result = ckbridge_core::project::import_animation(&fx.ck, &project, "walk.fbx").await;
    assert!(matches!(result, Err(BridgeError::MissingMetadata { .. })));
}

#[tokio::test]
async fn test_project_import_animation_keeps_root_files() {
    let fx = Fixture::new(RECORDING_TOOL);
    let project = Project::create(fx.temp.path().join("wolf"), "wolf").expect("project");
    let root = project.root().to_path_buf();

    std::fs::write(root.join("skeleton.hkx"), "real skeleton").expect("write");
    std::fs::create_dir_all(root.join("animationdata")).expect("mkdir");
    std::fs::write(root.join("animationdata/skeleton.hkx"), "data").expect("write");

    project
        .set(MetadataKey::ExportSkeletonHkx, "skeleton.hkx")
        .expect("set");
    project
        .set(MetadataKey::ExportAnimationDir, "data/meshes/actors/wolf/animations")
        .expect("set");
    project
        .set(MetadataKey::ExportAnimationDataDir, "animationdata")
        .expect("set");

    let result = ckbridge_core::project::import_animation(&fx.ck, &project, "walk.fbx").await;

    assert!(matches!(result, Err(BridgeError::FileExists { .. })));
    assert_eq!(
        std::fs::read_to_string(root.join("skeleton.hkx")).expect("read"),
        "real skeleton"
    );
    assert!(root.join("animationdata/skeleton.hkx").exists());
    assert!(
        !root
            .join("data/meshes/actors/wolf/animations/args.txt")
            .exists()
    );
}
