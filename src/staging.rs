//! Build-directory staging
//!
//! Copies each top-level package directory of the packages root into a freshly
//! recreated build directory. Any entry whose path relative to the packages
//! root contains one of the exclusion substrings is skipped.

use crate::error::{ReleaseError, Result};
use crate::manifest::MANIFEST_FILE;
use std::fs;
use std::path::{Path, PathBuf};

/// The publishable sub-projects found under the packages root, sorted by name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageSet {
    names: Vec<String>,
}

impl PackageSet {
    /// Enumerate the package directories directly under `packages_root`.
    ///
    /// Plain files at the top level are ignored; directories whose name
    /// matches an exclusion are skipped.
    pub fn discover(packages_root: &Path, exclude: &[String]) -> Result<Self> {
        if !packages_root.is_dir() {
            return Err(ReleaseError::staging(format!(
                "Packages root '{}' is not a directory",
                packages_root.display()
            )));
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(packages_root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_excluded(Path::new(&name), exclude) {
                continue;
            }
            names.push(name);
        }
        names.sort();

        Ok(PackageSet { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Directory of every package beneath `root`, in set order
    pub fn dirs_in(&self, root: &Path) -> Vec<PathBuf> {
        self.names.iter().map(|name| root.join(name)).collect()
    }

    /// Split into packages that carry a manifest beneath `root` and the
    /// names of those that do not.
    ///
    /// npm resolves a directory without `package.json` to the nearest
    /// ancestor manifest, so only the first half may be bumped or published.
    pub fn partition_by_manifest(&self, root: &Path) -> (PackageSet, Vec<String>) {
        let (with, without): (Vec<String>, Vec<String>) = self
            .names
            .iter()
            .cloned()
            .partition(|name| root.join(name).join(MANIFEST_FILE).is_file());
        (PackageSet { names: with }, without)
    }
}

/// Staged package directories under `staged_root` that have a manifest.
pub fn manifest_dirs(staged_root: &Path) -> Result<Vec<PathBuf>> {
    let (packages, skipped) =
        PackageSet::discover(staged_root, &[])?.partition_by_manifest(staged_root);
    for name in &skipped {
        tracing::debug!(package = %name, "no manifest; not bumped");
    }
    Ok(packages.dirs_in(staged_root))
}

impl FromIterator<String> for PackageSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut names: Vec<String> = iter.into_iter().collect();
        names.sort();
        PackageSet { names }
    }
}

/// True if `relative` contains any exclusion marker as a substring.
pub fn is_excluded(relative: &Path, exclude: &[String]) -> bool {
    let text = relative.to_string_lossy();
    exclude
        .iter()
        .any(|marker| !marker.is_empty() && text.contains(marker.as_str()))
}

/// Delete `build_dir` if present and create it empty.
pub fn reset_build_dir(build_dir: &Path) -> Result<()> {
    if build_dir.exists() {
        fs::remove_dir_all(build_dir)?;
    }
    fs::create_dir_all(build_dir)?;
    Ok(())
}

/// Recreate `build_dir` and copy every package from `packages_root` into it.
///
/// Returns the staged [`PackageSet`].
pub fn stage_packages(packages_root: &Path, build_dir: &Path, exclude: &[String]) -> Result<PackageSet> {
    // Discover first so a missing packages root leaves the build dir alone.
    let packages = PackageSet::discover(packages_root, exclude)?;
    reset_build_dir(build_dir)?;

    for name in packages.names() {
        copy_filtered(
            &packages_root.join(name),
            &build_dir.join(name),
            Path::new(name),
            exclude,
        )?;
    }

    tracing::debug!(
        count = packages.len(),
        build_dir = %build_dir.display(),
        "staged packages"
    );
    Ok(packages)
}

fn copy_filtered(src: &Path, dst: &Path, relative: &Path, exclude: &[String]) -> Result<()> {
    fs::create_dir_all(dst)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let child_relative = relative.join(entry.file_name());
        if is_excluded(&child_relative, exclude) {
            tracing::trace!(path = %child_relative.display(), "excluded from staging");
            continue;
        }

        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            copy_filtered(&src_path, &dst_path, &child_relative, exclude)?;
        } else if file_type.is_file() {
            fs::copy(&src_path, &dst_path)?;
        } else if file_type.is_symlink() {
            // Linked files are copied by content; linked directories could cycle.
            if fs::metadata(&src_path)?.is_file() {
                fs::copy(&src_path, &dst_path)?;
            } else {
                tracing::warn!(path = %child_relative.display(), "skipping symlinked directory");
            }
        }
    }

    Ok(())
}
