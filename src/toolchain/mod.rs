//! External release tooling abstraction layer
//!
//! This module provides a trait-based abstraction over the tools a release
//! shells out to, allowing the orchestrator to run against real processes or
//! against a recording mock in tests.
//!
//! # Overview
//!
//! The primary abstraction is the [Toolchain] trait. The concrete
//! implementations are:
//!
//! - [npm::NpmToolchain]: spawns `npm` and the changelog/release tool
//! - [mock::MockToolchain]: records calls and returns scripted results
//!
//! # Usage
//!
//! The orchestrator only sees `&dyn Toolchain`, so tests inject the mock:
//!
//! ```rust
//! # use pkg_release::toolchain::{MockToolchain, Toolchain};
//! # use pkg_release::domain::DistTag;
//! # use std::path::Path;
//! let toolchain = MockToolchain::new();
//! toolchain.publish(Path::new("build/rating"), "https://registry.npmjs.org/", &DistTag::Next)?;
//! assert_eq!(toolchain.calls().len(), 1);
//! # Ok::<(), pkg_release::ReleaseError>(())
//! ```

pub mod mock;
pub mod npm;
pub mod process;

pub use mock::{MockToolchain, ToolchainCall};
pub use npm::NpmToolchain;

use crate::domain::{DistTag, VersionSpecifier};
use crate::error::Result;
use semver::Version;
use std::path::Path;

/// Everything the changelog tool needs to cut a hosted release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Version being released
    pub version: Version,
    /// Lower bound reference for the changelog, if any
    pub from: Option<String>,
    /// Remote the release tag is pushed to
    pub git_remote: String,
    /// Ask the tool to preview instead of creating anything
    pub dry_run: bool,
}

/// Release operations performed by external tools
///
/// ## Thread Safety
///
/// Implementors must be `Send + Sync`, matching how the orchestrator borrows
/// them for the whole run.
///
/// ## Error Handling
///
/// Tool failures map to [crate::error::ReleaseError::ExternalOperation];
/// registry lookups map to [crate::error::ReleaseError::RegistryQuery] so the
/// caller can treat them as recoverable.
pub trait Toolchain: Send + Sync {
    /// Rewrite the manifest version of every package staged under `staged_root`.
    ///
    /// # Arguments
    /// * `staged_root` - The build directory holding staged package directories
    /// * `version` - Literal version or bump keyword
    /// * `quiet` - Suppress the tool's output
    ///
    /// # Returns
    /// * `Ok(())` - Every manifest was rewritten
    /// * `Err` - The tool could not run or exited non-zero
    fn bump_version(&self, staged_root: &Path, version: &VersionSpecifier, quiet: bool) -> Result<()>;

    /// Generate the changelog and create the hosted release record.
    ///
    /// Runs interactively; the operator may be prompted.
    fn generate_changelog_and_release(&self, request: &ReleaseRequest) -> Result<()>;

    /// Upload the package in `package_dir` to `registry` under `tag`.
    fn publish(&self, package_dir: &Path, registry: &str, tag: &DistTag) -> Result<()>;

    /// The version of `package` currently published on `registry`.
    ///
    /// # Returns
    /// * `Ok(Version)` - The published version
    /// * `Err(RegistryQuery)` - The package is unpublished or the lookup failed
    fn query_published_version(&self, package: &str, registry: &str) -> Result<Version>;

    /// The command line [Toolchain::publish] would run, for dry runs.
    fn describe_publish(&self, package_dir: &Path, registry: &str, tag: &DistTag) -> String {
        format!(
            "(cd {} && npm publish --registry {} --tag {})",
            package_dir.display(),
            registry,
            tag
        )
    }
}
