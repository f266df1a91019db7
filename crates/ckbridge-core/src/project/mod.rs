//! Project directories and their metadata.
//!
//! A project is a directory holding a `workspace.mel` marker and a
//! `metadata.json` file. The metadata maps well-known keys to project
//! paths so that conversions can run without re-entering every argument.

mod layout;
mod recent;
mod workflow;

pub use recent::RecentProjects;
pub use workflow::import_animation;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{BridgeError, BridgeResult};
use crate::path::sanitize_path;

/// Marker file written by the host application.
pub const WORKSPACE_FILE: &str = "workspace.mel";

/// Metadata file at the project root.
pub const METADATA_FILE: &str = "metadata.json";

/// Whether `path` contains both project files.
pub fn is_project(path: &Path) -> bool {
    [WORKSPACE_FILE, METADATA_FILE]
        .iter()
        .all(|name| path.join(name).exists())
}

/// Well-known metadata keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    ImportSkeletonHkx,
    ImportSkeletonNif,
    ImportCacheTxt,
    ImportAnimationDir,
    ImportBehaviorDir,
    SkeletonScene,
    AnimationSceneDir,
    TextureDir,
    ExportJointName,
    ExportMeshName,
    ExportSkeletonHkx,
    ExportSkeletonNif,
    ExportSkinNif,
    ExportCacheTxt,
    ExportAnimationDir,
    ExportBehaviorDir,
    ExportAnimationDataDir,
}

impl MetadataKey {
    /// Every known key, in display order.
    pub const ALL: [MetadataKey; 17] = [
        Self::ImportSkeletonHkx,
        Self::ImportSkeletonNif,
        Self::ImportCacheTxt,
        Self::ImportAnimationDir,
        Self::ImportBehaviorDir,
        Self::SkeletonScene,
        Self::AnimationSceneDir,
        Self::TextureDir,
        Self::ExportJointName,
        Self::ExportMeshName,
        Self::ExportSkeletonHkx,
        Self::ExportSkeletonNif,
        Self::ExportSkinNif,
        Self::ExportCacheTxt,
        Self::ExportAnimationDir,
        Self::ExportBehaviorDir,
        Self::ExportAnimationDataDir,
    ];

    /// Key as stored in `metadata.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImportSkeletonHkx => "importskeleton.hkx",
            Self::ImportSkeletonNif => "importskeleton.nif",
            Self::ImportCacheTxt => "importcache.txt",
            Self::ImportAnimationDir => "importanimations",
            Self::ImportBehaviorDir => "importbehaviors",
            Self::SkeletonScene => "skeleton.ma",
            Self::AnimationSceneDir => "animations",
            Self::TextureDir => "textures",
            Self::ExportJointName => "exportjointname",
            Self::ExportMeshName => "exportskinname",
            Self::ExportSkeletonHkx => "exportskeleton.hkx",
            Self::ExportSkeletonNif => "exportskeleton.nif",
            Self::ExportSkinNif => "exportskin.nif",
            Self::ExportCacheTxt => "exportcache.txt",
            Self::ExportAnimationDir => "exportanimations",
            Self::ExportBehaviorDir => "exportbehaviors",
            Self::ExportAnimationDataDir => "exportanimationdata",
        }
    }

    /// Look a key up by its stored name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project rooted at a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    root: String,
}

impl Project {
    /// Wrap a directory as given, without checking or resolving it.
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            root: sanitize_path(&directory.as_ref().to_string_lossy()),
        }
    }

    /// Open an existing project. Relative directories are resolved against
    /// the current directory.
    pub fn open(directory: impl AsRef<Path>) -> BridgeResult<Self> {
        let directory = std::path::absolute(directory)?;
        if !is_project(&directory) {
            return Err(BridgeError::NotAProject { path: directory });
        }
        Ok(Self::new(directory))
    }

    /// The project containing `path`, searching upwards from it.
    ///
    /// `path` is made absolute first, so `.` and other relative paths find
    /// the project around the current directory.
    pub fn find(path: impl AsRef<Path>) -> Option<Self> {
        let path = std::path::absolute(path).ok()?;
        path.ancestors().find(|dir| is_project(dir)).map(Self::new)
    }

    /// Create or update a project layout on disk.
    pub fn create(directory: impl AsRef<Path>, name: &str) -> BridgeResult<Self> {
        let directory = std::path::absolute(directory)?;
        layout::create(&directory, name)?;
        Ok(Self::new(directory))
    }

    /// Sanitized project root.
    pub fn directory(&self) -> &str {
        &self.root
    }

    /// Project root as a path.
    pub fn root(&self) -> &Path {
        Path::new(&self.root)
    }

    /// Path of the metadata file.
    pub fn metadata_file(&self) -> PathBuf {
        self.root().join(METADATA_FILE)
    }

    /// The whole metadata object. Missing file reads as empty.
    pub fn metadata(&self) -> BridgeResult<Map<String, Value>> {
        let file = self.metadata_file();
        if !file.exists() {
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(file)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Replace the metadata object.
    pub fn set_metadata(&self, data: &Map<String, Value>) -> BridgeResult<()> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        data.serialize(&mut serializer)?;
        fs::write(self.metadata_file(), buffer)?;
        Ok(())
    }

    /// Raw metadata value by stored name.
    pub fn value(&self, name: &str) -> BridgeResult<Option<Value>> {
        Ok(self.metadata()?.get(name).cloned())
    }

    /// Store a raw value. Strings are sanitized first.
    pub fn set_value(&self, name: &str, value: Value) -> BridgeResult<()> {
        let value = match value {
            Value::String(text) => Value::String(sanitize_path(&text)),
            other => other,
        };
        let mut data = self.metadata()?;
        data.insert(name.to_string(), value);
        self.set_metadata(&data)
    }

    /// String value of a known key, empty when unset.
    pub fn get(&self, key: MetadataKey) -> BridgeResult<String> {
        Ok(match self.value(key.as_str())? {
            Some(Value::String(text)) => sanitize_path(&text),
            _ => String::new(),
        })
    }

    /// Store a string value for a known key.
    pub fn set(&self, key: MetadataKey, value: &str) -> BridgeResult<()> {
        self.set_value(key.as_str(), Value::String(value.to_string()))
    }

    /// Convert a full path into a project-relative one.
    ///
    /// Paths outside the project come back sanitized but otherwise as is.
    pub fn project_path(&self, path: &str) -> String {
        let path = sanitize_path(path);
        match path.strip_prefix(&self.root) {
            Some(rest) if rest.starts_with('/') => rest[1..].to_string(),
            Some("") => String::new(),
            _ => path,
        }
    }

    /// Convert a project-relative path into a full one.
    pub fn full_path(&self, path: &str, must_exist: bool) -> BridgeResult<PathBuf> {
        let full = PathBuf::from(sanitize_path(&self.root().join(path).to_string_lossy()));
        if must_exist && !full.exists() {
            return Err(BridgeError::PathNotFound { path: full });
        }
        Ok(full)
    }

    /// Full path of a known key's value, which must be set and exist.
    pub fn full_path_of(&self, key: MetadataKey) -> BridgeResult<PathBuf> {
        self.optional_full_path_of(key)?
            .ok_or_else(|| BridgeError::MissingMetadata {
                key: key.as_str().to_string(),
            })
    }

    /// Full path of a known key's value, `None` when the key is unset.
    pub fn optional_full_path_of(&self, key: MetadataKey) -> BridgeResult<Option<PathBuf>> {
        let relative = self.get(key)?;
        if relative.is_empty() {
            return Ok(None);
        }
        self.full_path(&relative, true).map(Some)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Project({})", self.root)
    }
}
