// Shared fixtures for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use pkg_release::config::Config;
use tempfile::TempDir;

/// A scratch repository with a `packages/` tree shaped like a component library
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let ws = Workspace { dir };

        ws.write(
            "packages/rating/package.json",
            r#"{"name": "@acme/rating", "version": "1.0.0", "main": "lib/index.js"}"#,
        );
        ws.write("packages/rating/lib/index.js", "export { Rating } from './Rating';\n");
        ws.write("packages/rating/lib/Rating.js", "export const Rating = () => null;\n");
        ws.write(
            "packages/rating/lib/__tests__/Rating.test.js",
            "test('renders', () => {});\n",
        );
        ws.write("packages/rating/node_modules/react/index.js", "module.exports = {};\n");
        ws.write(
            "packages/stars/package.json",
            r#"{"name": "@acme/stars", "version": "1.0.0"}"#,
        );
        ws.write("packages/stars/assets/star.svg", "<svg></svg>\n");
        ws.write("packages/README.md", "top-level file, not a package\n");

        ws
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
        fs::write(path, content).expect("write fixture");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read file")
    }

    pub fn config(&self) -> Config {
        Config {
            packages_root: self.path("packages"),
            build_dir: self.path("build"),
            ..Config::default()
        }
    }
}
