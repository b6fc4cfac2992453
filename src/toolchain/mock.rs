use crate::domain::{DistTag, VersionSpecifier};
use crate::error::{ReleaseError, Result};
use crate::manifest;
use crate::staging;
use crate::toolchain::{ReleaseRequest, Toolchain};
use semver::Version;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One recorded toolchain invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolchainCall {
    BumpVersion {
        staged_root: PathBuf,
        version: String,
        quiet: bool,
    },
    ChangelogAndRelease(ReleaseRequest),
    Publish {
        package_dir: PathBuf,
        registry: String,
        tag: DistTag,
    },
    QueryPublishedVersion {
        package: String,
        registry: String,
    },
}

/// Mock toolchain for testing without spawning processes
///
/// Records every call. `bump_version` rewrites staged `package.json` files the
/// way `npm version` would, so later steps can read the resolved version.
#[derive(Debug, Default)]
pub struct MockToolchain {
    calls: Mutex<Vec<ToolchainCall>>,
    published: Option<Version>,
    bump_to: Option<Version>,
    fail_on: Option<&'static str>,
}

impl MockToolchain {
    /// Create a mock with no published version and no failures
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the registry report `version` as currently published
    pub fn with_published(mut self, version: Version) -> Self {
        self.published = Some(version);
        self
    }

    /// Version manifests are set to when bumped by keyword
    pub fn with_bump_result(mut self, version: Version) -> Self {
        self.bump_to = Some(version);
        self
    }

    /// Fail the named operation: `bump`, `changelog`, or `publish`
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Snapshot of the calls made so far
    pub fn calls(&self) -> Vec<ToolchainCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Only the publish calls, in order
    pub fn published_dirs(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ToolchainCall::Publish { package_dir, .. } => Some(package_dir),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ToolchainCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn check(&self, operation: &'static str) -> Result<()> {
        if self.fail_on == Some(operation) {
            return Err(ReleaseError::external(operation, "mock failure"));
        }
        Ok(())
    }
}

impl Toolchain for MockToolchain {
    fn bump_version(&self, staged_root: &Path, version: &VersionSpecifier, quiet: bool) -> Result<()> {
        self.record(ToolchainCall::BumpVersion {
            staged_root: staged_root.to_path_buf(),
            version: version.to_string(),
            quiet,
        });
        self.check("bump")?;

        let target = match version {
            VersionSpecifier::Exact(v) => Some(v.clone()),
            VersionSpecifier::Bump(_) => self.bump_to.clone(),
        };
        if let Some(target) = target {
            for dir in staging::manifest_dirs(staged_root)? {
                manifest::write_version(&dir, &target)?;
            }
        }
        Ok(())
    }

    fn generate_changelog_and_release(&self, request: &ReleaseRequest) -> Result<()> {
        self.record(ToolchainCall::ChangelogAndRelease(request.clone()));
        self.check("changelog")
    }

    fn publish(&self, package_dir: &Path, registry: &str, tag: &DistTag) -> Result<()> {
        self.record(ToolchainCall::Publish {
            package_dir: package_dir.to_path_buf(),
            registry: registry.to_string(),
            tag: tag.clone(),
        });
        self.check("publish")
    }

    fn query_published_version(&self, package: &str, registry: &str) -> Result<Version> {
        self.record(ToolchainCall::QueryPublishedVersion {
            package: package.to_string(),
            registry: registry.to_string(),
        });
        self.published
            .clone()
            .ok_or_else(|| ReleaseError::registry_query(format!("{} is not published", package)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_publish() {
        let mock = MockToolchain::new();
        mock.publish(Path::new("build/a"), "https://r", &DistTag::Latest)
            .unwrap();
        assert_eq!(mock.published_dirs(), vec![PathBuf::from("build/a")]);
    }

    #[test]
    fn test_mock_unpublished_query_fails() {
        let mock = MockToolchain::new();
        let err = mock.query_published_version("pkg", "https://r").unwrap_err();
        assert!(matches!(err, ReleaseError::RegistryQuery(_)));
    }

    #[test]
    fn test_mock_published_query() {
        let mock = MockToolchain::new().with_published(Version::new(3, 0, 0));
        assert_eq!(
            mock.query_published_version("pkg", "https://r").unwrap(),
            Version::new(3, 0, 0)
        );
    }

    #[test]
    fn test_mock_failure_injection() {
        let mock = MockToolchain::new().failing_on("publish");
        assert!(mock
            .publish(Path::new("build/a"), "https://r", &DistTag::Next)
            .is_err());
        // The call is still recorded
        assert_eq!(mock.calls().len(), 1);
    }
}
