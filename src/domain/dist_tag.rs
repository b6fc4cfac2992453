//! Registry distribution tags and how a version maps onto one.

use crate::error::{ReleaseError, Result};
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// Registry channel a version is published under
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistTag {
    /// Default channel consumers install
    Latest,
    /// Opt-in channel for prereleases
    Next,
    /// Maintenance releases of an older major line
    Previous,
    /// Any other tag name the registry accepts
    Custom(String),
}

impl DistTag {
    pub fn as_str(&self) -> &str {
        match self {
            DistTag::Latest => "latest",
            DistTag::Next => "next",
            DistTag::Previous => "previous",
            DistTag::Custom(name) => name,
        }
    }
}

impl FromStr for DistTag {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        match name {
            "" => Err(ReleaseError::version("Distribution tag cannot be empty")),
            "latest" => Ok(DistTag::Latest),
            "next" => Ok(DistTag::Next),
            "previous" => Ok(DistTag::Previous),
            // npm refuses tags that would be ambiguous with a version range
            other if Version::parse(other.trim_start_matches('v')).is_ok() => {
                Err(ReleaseError::version(format!(
                    "Distribution tag '{}' looks like a version",
                    other
                )))
            }
            other if other.chars().any(char::is_whitespace) => Err(ReleaseError::version(
                format!("Distribution tag '{}' contains whitespace", other),
            )),
            other => Ok(DistTag::Custom(other.to_string())),
        }
    }
}

impl fmt::Display for DistTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prerelease label prefixes that publish to `next` when no config overrides them
pub fn default_next_labels() -> Vec<String> {
    vec!["beta".to_string(), "rc".to_string(), "alpha".to_string()]
}

/// True when `candidate` carries a prerelease label starting with one of `next_labels`
pub fn is_next_prerelease(candidate: &Version, next_labels: &[String]) -> bool {
    let label = candidate.pre.as_str();
    !label.is_empty() && next_labels.iter().any(|prefix| label.starts_with(prefix.as_str()))
}

/// Choose the distribution tag for `candidate`.
///
/// `published` is the version currently on the registry, or `None` when the
/// query failed or was skipped.
///
/// # Rules
/// 1. A prerelease label starting with one of `next_labels` publishes to `next`.
/// 2. Without a published version the release is `latest`.
/// 3. A lower major version than the published one goes to `previous`.
/// 4. Everything else is `latest`.
pub fn resolve_dist_tag(
    candidate: &Version,
    published: Option<&Version>,
    next_labels: &[String],
) -> DistTag {
    if is_next_prerelease(candidate, next_labels) {
        return DistTag::Next;
    }

    match published {
        Some(current) if candidate.major < current.major => DistTag::Previous,
        _ => DistTag::Latest,
    }
}
