//! On-disk project layout.

use std::fs;
use std::path::Path;

use tracing::info;

use super::{METADATA_FILE, WORKSPACE_FILE};
use crate::error::BridgeResult;

/// Header of a freshly written workspace marker.
const WORKSPACE_HEADER: &str = "//Maya Project Definition";

/// Folders the host application maps its file rules to.
const SCENE_FOLDERS: [&str; 3] = ["scenes", "scenes/animations", "textures"];

/// Game data folders, `{name}` is the actor name.
const DATA_FOLDERS: [&str; 10] = [
    "data/textures/actors/{name}",
    "data/meshes/animationdata/boundanims",
    "data/meshes/animationsetdata/{name}projectdata",
    "data/meshes/actors/{name}",
    "data/meshes/actors/{name}/animations",
    "data/meshes/actors/{name}/behaviors",
    "data/meshes/actors/{name}/character assets",
    "data/meshes/actors/{name}/characters",
    "data/meshes/animationdata",
    "data/meshes/animationsetdata",
];

/// Create the project files and folders below `directory`.
///
/// Existing projects are updated in place: the metadata is reset to an
/// empty object, an existing workspace marker is kept.
pub(super) fn create(directory: &Path, name: &str) -> BridgeResult<()> {
    fs::create_dir_all(directory)?;
    fs::write(directory.join(METADATA_FILE), "{}")?;

    let workspace = directory.join(WORKSPACE_FILE);
    if !workspace.exists() {
        fs::write(&workspace, WORKSPACE_HEADER)?;
    }

    for folder in SCENE_FOLDERS {
        fs::create_dir_all(directory.join(folder))?;
    }
    for folder in DATA_FOLDERS {
        fs::create_dir_all(directory.join(folder.replace("{name}", name)))?;
    }

    info!(directory = %directory.display(), name, "Created project");
    Ok(())
}
