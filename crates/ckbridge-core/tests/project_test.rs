//! Project lookup from relative paths.
//!
//! The current directory is process-wide, so everything that changes it
//! lives in this single test.

use std::path::Path;

use ckbridge_core::{Project, RecentProjects};

fn canonical(path: &Path) -> std::path::PathBuf {
    std::fs::canonicalize(path).expect("canonicalize")
}

#[test]
fn test_relative_paths_resolve_against_current_dir() {
    let temp = tempfile::tempdir().expect("tempdir");
    let project = Project::create(temp.path().join("wolf"), "wolf").expect("project");
    let previous = std::env::current_dir().expect("current dir");

    std::env::set_current_dir(project.root()).expect("enter project");
    let from_root = Project::find(".");
    let from_subdir_name = Project::find("scenes");

    std::env::set_current_dir(project.root().join("scenes/animations")).expect("enter subdir");
    let from_nested = Project::find(".");
    let opened = Project::open("../..");

    std::env::set_current_dir(&previous).expect("restore current dir");

    for found in [from_root, from_subdir_name, from_nested] {
        let found = found.expect("project found");
        assert!(found.root().is_absolute());
        assert_eq!(canonical(found.root()), canonical(project.root()));
    }
    let opened = opened.expect("open relative");
    assert!(opened.root().is_absolute());
    assert_eq!(canonical(opened.root()), canonical(project.root()));

    let recent = RecentProjects::new(temp.path().join("recent.json"));
    let entries = recent.add(opened.directory()).expect("add recent");
    assert!(Path::new(&entries[0]).is_absolute());
    assert_ne!(entries[0], ".");
}
