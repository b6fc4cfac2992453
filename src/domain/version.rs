use crate::error::{ReleaseError, Result};
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// Relative version increment understood by `npm version`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKeyword {
    Major,
    Minor,
    Patch,
    PreMajor,
    PreMinor,
    PrePatch,
    PreRelease,
}

impl BumpKeyword {
    /// All keywords in the order they are listed in help output
    pub const ALL: [BumpKeyword; 7] = [
        BumpKeyword::Major,
        BumpKeyword::Minor,
        BumpKeyword::Patch,
        BumpKeyword::PreMajor,
        BumpKeyword::PreMinor,
        BumpKeyword::PrePatch,
        BumpKeyword::PreRelease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKeyword::Major => "major",
            BumpKeyword::Minor => "minor",
            BumpKeyword::Patch => "patch",
            BumpKeyword::PreMajor => "premajor",
            BumpKeyword::PreMinor => "preminor",
            BumpKeyword::PrePatch => "prepatch",
            BumpKeyword::PreRelease => "prerelease",
        }
    }
}

impl FromStr for BumpKeyword {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        BumpKeyword::ALL
            .iter()
            .copied()
            .find(|keyword| keyword.as_str() == s)
            .ok_or_else(|| ReleaseError::version(format!("Unknown bump keyword: '{}'", s)))
    }
}

impl fmt::Display for BumpKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `version` argument: either a literal semantic version or a relative bump
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpecifier {
    Exact(Version),
    Bump(BumpKeyword),
}

impl VersionSpecifier {
    /// Parse a version argument.
    ///
    /// Keywords are matched exactly (`minor`, `prerelease`, ...). Anything else
    /// must be a full `MAJOR.MINOR.PATCH[-PRE][+BUILD]` version; partial or
    /// prefixed forms such as `1.2` or `v1.2.0` are rejected.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Returns the literal version, if this is one
    pub fn literal(&self) -> Option<&Version> {
        match self {
            VersionSpecifier::Exact(version) => Some(version),
            VersionSpecifier::Bump(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        self.literal().is_some()
    }
}

impl Default for VersionSpecifier {
    fn default() -> Self {
        VersionSpecifier::Bump(BumpKeyword::Minor)
    }
}

impl FromStr for VersionSpecifier {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(keyword) = trimmed.parse::<BumpKeyword>() {
            return Ok(VersionSpecifier::Bump(keyword));
        }

        Version::parse(trimmed)
            .map(VersionSpecifier::Exact)
            .map_err(|e| {
                ReleaseError::version(format!(
                    "'{}' is neither a semantic version nor a bump keyword: {}",
                    s, e
                ))
            })
    }
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSpecifier::Exact(version) => write!(f, "{}", version),
            VersionSpecifier::Bump(keyword) => write!(f, "{}", keyword),
        }
    }
}
