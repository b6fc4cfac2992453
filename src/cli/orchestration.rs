//! Main release workflow
//!
//! Two terminal paths, selected by [ExecutionMode]:
//!
//! - **Local**: stage packages, bump versions, then run the changelog tool,
//!   which creates the hosted release that triggers CI.
//! - **Automated**: stage packages, bump versions quietly, resolve the
//!   distribution tag, and publish every staged package.
//!
//! Nothing here reads argv; the binary builds [ReleaseArgs] and picks the mode.

use std::path::PathBuf;

use semver::Version;

use crate::boundary::ReleaseWarning;
use crate::config::Config;
use crate::domain::dist_tag::is_next_prerelease;
use crate::domain::{resolve_dist_tag, DistTag, ExecutionMode, VersionSpecifier};
use crate::error::{ReleaseError, Result};
use crate::manifest::PackageManifest;
use crate::staging::{self, PackageSet};
use crate::toolchain::{ReleaseRequest, Toolchain};
use crate::ui;

/// Arguments for the release workflow
///
/// Mirrors the CLI arguments in a form the workflow can be called with
/// programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Literal version or relative bump keyword
    pub version: VersionSpecifier,

    /// Skip the publish side effect and report the command instead
    pub dry_run: bool,

    /// Lower bound reference for changelog generation
    pub from: Option<String>,

    /// Remote the hosted release is created against
    pub git_remote: String,

    /// Explicit distribution tag, bypassing resolution
    pub dist_tag: Option<DistTag>,
}

impl Default for ReleaseArgs {
    fn default() -> Self {
        ReleaseArgs {
            version: VersionSpecifier::default(),
            dry_run: false,
            from: None,
            git_remote: "origin".to_string(),
            dist_tag: None,
        }
    }
}

/// Result of a successful release run
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// Local path finished: packages staged and the hosted release created
    Staged {
        version: Version,
        packages: Vec<String>,
    },
    /// Automated path finished: every package uploaded under `tag`
    Published {
        version: Version,
        tag: DistTag,
        packages: Vec<String>,
    },
    /// Automated path in dry-run mode: nothing uploaded
    DryRun {
        version: Version,
        tag: DistTag,
        commands: Vec<String>,
    },
}

/// Drives one release run against an injected [Toolchain]
pub struct Orchestrator<'a> {
    config: &'a Config,
    mode: ExecutionMode,
    toolchain: &'a dyn Toolchain,
    auth_token_present: bool,
    warnings: Vec<ReleaseWarning>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a Config, mode: ExecutionMode, toolchain: &'a dyn Toolchain) -> Self {
        Orchestrator {
            config,
            mode,
            toolchain,
            auth_token_present: false,
            warnings: Vec::new(),
        }
    }

    /// Record whether the registry credential named by `auth_token_env` is
    /// available. Assumed absent unless set, which only adds a warning.
    pub fn with_auth_token_present(mut self, present: bool) -> Self {
        self.auth_token_present = present;
        self
    }

    /// Warnings raised so far, in order
    pub fn warnings(&self) -> &[ReleaseWarning] {
        &self.warnings
    }

    pub fn run(&mut self, args: &ReleaseArgs) -> Result<ReleaseOutcome> {
        tracing::info!(mode = %self.mode, version = %args.version, dry_run = args.dry_run, "release started");
        match self.mode {
            ExecutionMode::Local => self.stage_and_release(args),
            ExecutionMode::Automated => self.stage_and_publish(args),
        }
    }

    fn stage_and_release(&mut self, args: &ReleaseArgs) -> Result<ReleaseOutcome> {
        // Checked before anything touches the build directory.
        let version = args.version.literal().cloned().ok_or_else(|| {
            ReleaseError::invalid_specifier(format!(
                "'{}' is a relative bump; a literal version such as 1.2.0 is required outside CI",
                args.version
            ))
        })?;

        ui::display_mode(self.mode, &version.to_string());
        let packages = self.stage()?;

        ui::display_status(&format!("Bumping staged packages to {}", version));
        self.toolchain
            .bump_version(&self.config.build_dir, &args.version, false)?;

        ui::display_status("Generating changelog and creating hosted release");
        self.toolchain
            .generate_changelog_and_release(&ReleaseRequest {
                version: version.clone(),
                from: args.from.clone(),
                git_remote: args.git_remote.clone(),
                dry_run: args.dry_run,
            })?;

        Ok(ReleaseOutcome::Staged {
            version,
            packages: packages.names().to_vec(),
        })
    }

    fn stage_and_publish(&mut self, args: &ReleaseArgs) -> Result<ReleaseOutcome> {
        ui::display_mode(self.mode, &args.version.to_string());
        let packages = self.stage()?;

        ui::display_status(&format!("Bumping staged packages ({})", args.version));
        self.toolchain
            .bump_version(&self.config.build_dir, &args.version, true)?;

        let version = self.released_version(&args.version, &packages)?;
        let tag = match &args.dist_tag {
            Some(tag) => tag.clone(),
            None => self.resolve_tag(&version, &packages, args.dry_run),
        };
        tracing::info!(%version, %tag, "distribution tag resolved");

        let config = self.config;
        let registry = config.registry.url.as_str();
        let dirs = packages.dirs_in(&config.build_dir);

        if args.dry_run {
            let commands: Vec<String> = dirs
                .iter()
                .map(|dir| self.toolchain.describe_publish(dir, registry, &tag))
                .collect();
            ui::display_dry_run(&commands);
            return Ok(ReleaseOutcome::DryRun {
                version,
                tag,
                commands,
            });
        }

        if !self.auth_token_present {
            self.warn(ReleaseWarning::MissingAuthToken {
                variable: config.auth_token_env.clone(),
            });
        }

        for (name, dir) in packages.names().iter().zip(&dirs) {
            ui::display_status(&format!("Publishing {} {} under '{}'", name, version, tag));
            self.toolchain.publish(dir, registry, &tag)?;
            ui::display_success(&format!("Published {}", name));
        }

        Ok(ReleaseOutcome::Published {
            version,
            tag,
            packages: packages.names().to_vec(),
        })
    }

    /// Stage every package and return the ones with a manifest.
    fn stage(&mut self) -> Result<PackageSet> {
        ui::display_status(&format!(
            "Staging {} into {}",
            self.config.packages_root.display(),
            self.config.build_dir.display()
        ));
        let packages = staging::stage_packages(
            &self.config.packages_root,
            &self.config.build_dir,
            &self.config.exclude,
        )?;
        if packages.is_empty() {
            self.warn(ReleaseWarning::EmptyPackageSet {
                packages_root: self.config.packages_root.display().to_string(),
            });
        }

        let (releasable, skipped) = packages.partition_by_manifest(&self.config.build_dir);
        for package in skipped {
            self.warn(ReleaseWarning::MissingManifest { package });
        }
        Ok(releasable)
    }

    /// The version being published: the literal argument, or what the bump
    /// wrote into the first staged manifest.
    fn released_version(&self, spec: &VersionSpecifier, packages: &PackageSet) -> Result<Version> {
        if let Some(version) = spec.literal() {
            return Ok(version.clone());
        }
        let first = self.first_staged_dir(packages).ok_or_else(|| {
            ReleaseError::staging(format!(
                "cannot resolve '{}' without a staged package",
                spec
            ))
        })?;
        PackageManifest::read(&first)?.semver()
    }

    fn resolve_tag(&mut self, version: &Version, packages: &PackageSet, dry_run: bool) -> DistTag {
        let next_labels = &self.config.tags.next_labels;
        if is_next_prerelease(version, next_labels) {
            return DistTag::Next;
        }

        let published = match self.registry_package(packages) {
            None => {
                self.warn(ReleaseWarning::RegistryQueryFailed {
                    package: "<unknown>".to_string(),
                    reason: "no registry package configured or found in manifests".to_string(),
                });
                None
            }
            Some(package) if dry_run => {
                self.warn(ReleaseWarning::RegistryQuerySkipped {
                    package,
                    version: version.to_string(),
                });
                None
            }
            Some(package) => match self
                .toolchain
                .query_published_version(&package, &self.config.registry.url)
            {
                Ok(published) => {
                    tracing::debug!(%package, %published, "published version");
                    Some(published)
                }
                Err(e) => {
                    self.warn(ReleaseWarning::RegistryQueryFailed {
                        package,
                        reason: e.to_string(),
                    });
                    None
                }
            },
        };

        resolve_dist_tag(version, published.as_ref(), &self.config.tags.next_labels)
    }

    fn registry_package(&self, packages: &PackageSet) -> Option<String> {
        if let Some(name) = &self.config.registry.package {
            return Some(name.clone());
        }
        let first = self.first_staged_dir(packages)?;
        PackageManifest::read(&first).ok()?.name
    }

    fn first_staged_dir(&self, packages: &PackageSet) -> Option<PathBuf> {
        packages
            .names()
            .first()
            .map(|name| self.config.build_dir.join(name))
    }

    fn warn(&mut self, warning: ReleaseWarning) {
        tracing::debug!(%warning, "release warning");
        ui::display_release_warning(&warning);
        self.warnings.push(warning);
    }
}

/// Run one release.
///
/// # Arguments
///
/// * `args` - Version, dry-run flag, changelog base, remote, tag override
/// * `mode` - Local (stage + hosted release) or Automated (publish)
/// * `auth_token_present` - Whether the registry credential is set
/// * `config` - Staging layout, registry and tool settings
/// * `toolchain` - External tools
///
/// # Returns
///
/// The outcome of whichever path ran, or the first error; the build
/// directory is left as-is on failure.
pub fn run_release(
    args: &ReleaseArgs,
    mode: ExecutionMode,
    auth_token_present: bool,
    config: &Config,
    toolchain: &dyn Toolchain,
) -> Result<ReleaseOutcome> {
    Orchestrator::new(config, mode, toolchain)
        .with_auth_token_present(auth_token_present)
        .run(args)
}
