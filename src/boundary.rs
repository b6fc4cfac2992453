use std::fmt;

/// Non-fatal conditions met while releasing.
/// These are reported to the operator but never stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// The current published version could not be read; tagging assumes an unpublished package
    RegistryQueryFailed { package: String, reason: String },
    /// Dry run skipped the registry lookup, so `version` was tagged as if unpublished
    RegistryQuerySkipped { package: String, version: String },
    /// A staged directory has no manifest and is neither bumped nor published
    MissingManifest { package: String },
    /// The registry credential variable is not set
    MissingAuthToken { variable: String },
    /// No package directories were found to stage
    EmptyPackageSet { packages_root: String },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::RegistryQueryFailed { package, reason } => {
                write!(
                    f,
                    "Cannot read published version of '{}' ({}); assuming first release",
                    package, reason
                )
            }
            ReleaseWarning::RegistryQuerySkipped { package, version } => {
                write!(
                    f,
                    "Dry run: registry not queried for '{}'; reporting 'latest', but a real run \
                     publishes {} under 'previous' if a higher major is already published",
                    package, version
                )
            }
            ReleaseWarning::MissingManifest { package } => {
                write!(
                    f,
                    "'{}' has no package.json; it is staged but not versioned or published",
                    package
                )
            }
            ReleaseWarning::MissingAuthToken { variable } => {
                write!(f, "{} is not set; the registry will reject the publish", variable)
            }
            ReleaseWarning::EmptyPackageSet { packages_root } => {
                write!(f, "No packages found under '{}'", packages_root)
            }
        }
    }
}
