mod common;

use std::fs;

use common::Workspace;
use pkg_release::staging::{reset_build_dir, stage_packages, PackageSet};

fn markers() -> Vec<String> {
    vec!["node_modules".to_string(), "__tests__".to_string()]
}

#[test]
fn test_discover_lists_only_package_directories() {
    let ws = Workspace::new();
    ws.write("packages/node_modules/.bin/tool", "#!/bin/sh\n");

    let set = PackageSet::discover(&ws.path("packages"), &markers()).unwrap();

    assert_eq!(set.names(), &["rating".to_string(), "stars".to_string()]);
}

#[test]
fn test_stage_excludes_dependency_caches_and_tests() {
    let ws = Workspace::new();

    stage_packages(&ws.path("packages"), &ws.path("build"), &markers()).unwrap();

    assert!(!ws.path("build/rating/node_modules").exists());
    assert!(!ws.path("build/rating/lib/__tests__").exists());
    assert!(!ws.path("build/README.md").exists());
    assert!(ws.path("build/rating/lib/index.js").is_file());
}

#[test]
fn test_stage_preserves_structure_and_bytes() {
    let ws = Workspace::new();
    let binary: Vec<u8> = (0u8..=255).chain(0u8..=255).collect();
    fs::create_dir_all(ws.path("packages/stars/assets/icons")).unwrap();
    fs::write(ws.path("packages/stars/assets/icons/half.png"), &binary).unwrap();

    stage_packages(&ws.path("packages"), &ws.path("build"), &markers()).unwrap();

    assert_eq!(
        fs::read(ws.path("build/stars/assets/icons/half.png")).unwrap(),
        binary
    );
    assert_eq!(
        ws.read("build/rating/lib/Rating.js"),
        ws.read("packages/rating/lib/Rating.js")
    );
    assert_eq!(
        ws.read("build/stars/package.json"),
        ws.read("packages/stars/package.json")
    );
}

#[test]
fn test_marker_matches_anywhere_in_relative_path() {
    let ws = Workspace::new();
    ws.write("packages/stars/docs/my__tests__notes.md", "excluded by substring\n");
    ws.write("packages/stars/docs/notes.md", "kept\n");

    stage_packages(&ws.path("packages"), &ws.path("build"), &markers()).unwrap();

    assert!(!ws.path("build/stars/docs/my__tests__notes.md").exists());
    assert!(ws.path("build/stars/docs/notes.md").is_file());
}

#[test]
fn test_repo_location_does_not_trigger_exclusion() {
    // Markers apply to paths relative to the packages root only
    let ws = Workspace::new();
    let nested = ws.path("node_modules/checkout");
    fs::create_dir_all(nested.join("packages/rating")).unwrap();
    fs::write(nested.join("packages/rating/package.json"), "{}").unwrap();

    let set = stage_packages(&nested.join("packages"), &nested.join("build"), &markers()).unwrap();

    assert_eq!(set.names(), &["rating".to_string()]);
    assert!(nested.join("build/rating/package.json").is_file());
}

#[test]
fn test_reset_build_dir_clears_previous_contents() {
    let ws = Workspace::new();
    ws.write("build/old/file.txt", "stale");

    reset_build_dir(&ws.path("build")).unwrap();

    assert!(ws.path("build").is_dir());
    assert_eq!(fs::read_dir(ws.path("build")).unwrap().count(), 0);
}

#[test]
fn test_empty_packages_root_stages_nothing() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.path("empty")).unwrap();

    let set = stage_packages(&ws.path("empty"), &ws.path("build"), &markers()).unwrap();

    assert!(set.is_empty());
    assert!(ws.path("build").is_dir());
}
