//! Recently opened projects, most recent first.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BridgeResult;

/// Cache file name in the system temp directory.
const CACHE_NAME: &str = "ckprojects.json";

/// JSON list of recently used project directories.
#[derive(Debug, Clone)]
pub struct RecentProjects {
    cache_file: PathBuf,
}

impl Default for RecentProjects {
    fn default() -> Self {
        Self::new(std::env::temp_dir().join(CACHE_NAME))
    }
}

impl RecentProjects {
    /// Older entries kept besides the one being added.
    pub const MAX_ENTRIES: usize = 10;

    /// Use a specific cache file.
    pub fn new(cache_file: impl Into<PathBuf>) -> Self {
        Self {
            cache_file: cache_file.into(),
        }
    }

    /// The cache file location.
    pub fn cache_file(&self) -> &Path {
        &self.cache_file
    }

    /// Cached directories, empty when there is no cache yet.
    pub fn load(&self) -> BridgeResult<Vec<String>> {
        if !self.cache_file.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.cache_file)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Move `directory` to the front and drop entries that no longer exist.
    pub fn add(&self, directory: &str) -> BridgeResult<Vec<String>> {
        let mut projects: Vec<String> = self
            .load()?
            .into_iter()
            .filter(|path| path != directory && Path::new(path).exists())
            .take(Self::MAX_ENTRIES)
            .collect();
        projects.insert(0, directory.to_string());

        fs::write(&self.cache_file, serde_json::to_string(&projects)?)?;
        Ok(projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_without_cache() {
        let temp = tempfile::tempdir().expect("tempdir");
        let recent = RecentProjects::new(temp.path().join("recent.json"));
        assert!(recent.load().expect("load").is_empty());
    }

    #[test]
    fn test_add_moves_to_front_and_drops_missing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        std::fs::create_dir_all(&a).expect("mkdir");
        std::fs::create_dir_all(&b).expect("mkdir");
        let a = a.to_string_lossy().to_string();
        let b = b.to_string_lossy().to_string();
        let gone = temp.path().join("gone").to_string_lossy().to_string();

        let recent = RecentProjects::new(temp.path().join("recent.json"));
        std::fs::write(
            recent.cache_file(),
            serde_json::to_string(&vec![&gone, &a, &b]).expect("json"),
        )
        .expect("write");

        let projects = recent.add(&b).expect("add");
        assert_eq!(projects, vec![b.clone(), a.clone()]);
        assert_eq!(recent.load().expect("load"), vec![b, a]);
    }

    #[test]
    fn test_add_caps_entries() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut dirs = Vec::new();
        for i in 0..15 {
            let dir = temp.path().join(format!("p{i}"));
            std::fs::create_dir_all(&dir).expect("mkdir");
            dirs.push(dir.to_string_lossy().to_string());
        }

        let recent = RecentProjects::new(temp.path().join("recent.json"));
        for dir in &dirs {
            recent.add(dir).expect("add");
        }

        let projects = recent.load().expect("load");
        assert_eq!(projects.len(), RecentProjects::MAX_ENTRIES + 1);
        assert_eq!(projects[0], dirs[14]);
    }
}
