//! Conversions driven by project metadata.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::{MetadataKey, Project};
use crate::ckcmd::CkCmd;
use crate::commands::ImportAnimation;
use crate::error::{BridgeError, BridgeResult};

/// Import an fbx animation into the project's export animation folder.
///
/// Uses the export skeleton, cache file and behavior folder from the
/// metadata. ck-cmd looks for animation data next to the project root, so
/// the files of the animation data folder are staged there for the run
/// and copied back afterwards, whether or not the conversion succeeded.
pub async fn import_animation(ck: &CkCmd, project: &Project, fbx: &str) -> BridgeResult<String> {
    let skeleton_hkx = project.full_path_of(MetadataKey::ExportSkeletonHkx)?;
    let output_dir = project.full_path_of(MetadataKey::ExportAnimationDir)?;
    let cache_file = project.optional_full_path_of(MetadataKey::ExportCacheTxt)?;
    let behavior_dir = project.optional_full_path_of(MetadataKey::ExportBehaviorDir)?;
    let data_dir = project.optional_full_path_of(MetadataKey::ExportAnimationDataDir)?;

    let staged = match &data_dir {
        Some(dir) => stage_files(dir, project.root())?,
        None => Vec::new(),
    };

    let skeleton_hkx = skeleton_hkx.to_string_lossy();
    let output_dir = output_dir.to_string_lossy();
    let cache_file = cache_file.map(|p| p.to_string_lossy().into_owned()).unwrap_or_default();
    let behavior_dir = behavior_dir
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    let result = ck
        .import_animation(&ImportAnimation {
            skeleton_hkx: &skeleton_hkx,
            animation_fbx: fbx,
            output_dir: &output_dir,
            cache_file: &cache_file,
            behavior_dir: &behavior_dir,
        })
        .await;

    unstage_files(&staged)?;

    if result.is_ok() {
        info!(project = %project, animation = fbx, "Imported animation");
    }
    result
}

/// Copy every file of `source` into `target`, in name order. Returns
/// (original, copy) pairs.
///
/// Existing files in `target` are never overwritten: the first clash, or
/// any other error, removes the copies made so far and fails.
fn stage_files(source: &Path, target: &Path) -> BridgeResult<Vec<(PathBuf, PathBuf)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    let mut staged = Vec::with_capacity(files.len());
    for original in files {
        if let Err(err) = stage_file(&original, target, &mut staged) {
            discard_staged(&staged);
            return Err(err);
        }
    }
    Ok(staged)
}

fn stage_file(
    original: &Path,
    target: &Path,
    staged: &mut Vec<(PathBuf, PathBuf)>,
) -> BridgeResult<()> {
    let Some(name) = original.file_name() else {
        return Ok(());
    };
    let copy = target.join(name);
    if copy.exists() {
        return Err(BridgeError::FileExists { path: copy });
    }
    fs::copy(original, &copy)?;
    staged.push((original.to_path_buf(), copy));
    Ok(())
}

/// Remove staged copies without copying them back.
fn discard_staged(staged: &[(PathBuf, PathBuf)]) {
    for (_, copy) in staged {
        if let Err(err) = fs::remove_file(copy) {
            warn!(path = %copy.display(), error = %err, "Failed to remove staged file");
        }
    }
}

/// Copy staged files back over their originals and remove the copies.
fn unstage_files(staged: &[(PathBuf, PathBuf)]) -> BridgeResult<()> {
    for (original, copy) in staged {
        if !copy.exists() {
            warn!(path = %copy.display(), "Staged file disappeared");
            continue;
        }
        fs::copy(copy, original)?;
        fs::remove_file(copy)?;
    }
    Ok(())
}
