//! Minimal access to a package's `package.json`.

use crate::error::{ReleaseError, Result};
use semver::Version;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const MANIFEST_FILE: &str = "package.json";

/// The manifest fields pkg-release cares about
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl PackageManifest {
    /// Read `package.json` from `package_dir`
    pub fn read(package_dir: &Path) -> Result<Self> {
        let path = package_dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|e| {
            ReleaseError::staging(format!("Cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ReleaseError::staging(format!("Invalid manifest {}: {}", path.display(), e))
        })
    }

    /// The manifest version as a semantic version
    pub fn semver(&self) -> Result<Version> {
        let raw = self
            .version
            .as_deref()
            .ok_or_else(|| ReleaseError::version("Manifest has no version field"))?;
        Version::parse(raw)
            .map_err(|e| ReleaseError::version(format!("Manifest version '{}': {}", raw, e)))
    }
}

/// Rewrite the `version` field of `package_dir/package.json`, keeping every other key.
pub fn write_version(package_dir: &Path, version: &Version) -> Result<()> {
    let path = package_dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path)?;
    let mut value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        ReleaseError::staging(format!("Invalid manifest {}: {}", path.display(), e))
    })?;

    let object = value.as_object_mut().ok_or_else(|| {
        ReleaseError::staging(format!("Manifest {} is not a JSON object", path.display()))
    })?;
    object.insert(
        "version".to_string(),
        serde_json::Value::String(version.to_string()),
    );

    let rendered = serde_json::to_string_pretty(&value)
        .map_err(|e| ReleaseError::staging(e.to_string()))?;
    fs::write(&path, rendered + "\n")?;
    Ok(())
}
