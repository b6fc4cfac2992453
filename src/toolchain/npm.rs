use crate::config::Config;
use crate::domain::{DistTag, VersionSpecifier};
use crate::error::{ReleaseError, Result};
use crate::staging;
use crate::toolchain::process::{render, run_captured, run_inherited};
use crate::toolchain::{ReleaseRequest, Toolchain};
use regex::Regex;
use semver::Version;
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

/// Toolchain backed by `npm` and a changelog/release tool run through `npx`.
#[derive(Debug, Clone)]
pub struct NpmToolchain {
    npm: String,
    npx: String,
    release_tool: String,
    max_output_bytes: usize,
}

impl NpmToolchain {
    /// Build a toolchain from the tool names and output bound in `config`.
    pub fn from_config(config: &Config) -> Self {
        NpmToolchain {
            npm: config.tools.npm.clone(),
            npx: config.tools.npx.clone(),
            release_tool: config.tools.release_tool.clone(),
            max_output_bytes: config.max_output_bytes,
        }
    }

    pub fn bump_command(&self, package_dir: &Path, version: &VersionSpecifier) -> Command {
        let mut cmd = Command::new(&self.npm);
        cmd.arg("version")
            .arg(version.to_string())
            .args(["--no-git-tag-version", "--allow-same-version"])
            .current_dir(package_dir);
        cmd
    }

    pub fn changelog_command(&self, request: &ReleaseRequest) -> Command {
        let mut cmd = Command::new(&self.npx);
        cmd.arg(&self.release_tool)
            .arg(request.version.to_string())
            .args(["--ci=false", "--github.release", "--npm.publish=false"])
            .arg(format!("--git.pushRepo={}", request.git_remote));
        if let Some(from) = &request.from {
            cmd.arg(format!(
                "--git.changelog=git log --pretty=format:\"* %s (%h)\" {}...HEAD",
                from
            ));
        }
        if request.dry_run {
            cmd.arg("--dry-run");
        }
        cmd
    }

    pub fn publish_command(&self, package_dir: &Path, registry: &str, tag: &DistTag) -> Command {
        let mut cmd = Command::new(&self.npm);
        cmd.args(["publish", "--registry", registry, "--tag", tag.as_str()])
            .current_dir(package_dir);
        cmd
    }

    pub fn query_command(&self, package: &str, registry: &str) -> Command {
        let mut cmd = Command::new(&self.npm);
        cmd.args(["view", package, "version", "--registry", registry]);
        cmd
    }
}

// A bare version line as printed by `npm view`, optionally `v`-prefixed
static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(\d+\.\d+\.\d+(?:[-+][0-9A-Za-z.+-]+)?)$").unwrap()
});

impl Toolchain for NpmToolchain {
    fn bump_version(&self, staged_root: &Path, version: &VersionSpecifier, quiet: bool) -> Result<()> {
        // A directory without package.json would make npm rewrite an ancestor manifest.
        for dir in staging::manifest_dirs(staged_root)? {
            let cmd = self.bump_command(&dir, version);
            if quiet {
                run_captured(cmd, "version bump", self.max_output_bytes)?;
            } else {
                run_inherited(cmd, "version bump")?;
            }
        }
        Ok(())
    }

    fn generate_changelog_and_release(&self, request: &ReleaseRequest) -> Result<()> {
        run_inherited(self.changelog_command(request), "changelog and release")
    }

    fn publish(&self, package_dir: &Path, registry: &str, tag: &DistTag) -> Result<()> {
        run_inherited(self.publish_command(package_dir, registry, tag), "publish")
    }

    fn query_published_version(&self, package: &str, registry: &str) -> Result<Version> {
        let output = run_captured(
            self.query_command(package, registry),
            "registry query",
            self.max_output_bytes,
        )
        .map_err(|e| ReleaseError::registry_query(e.to_string()))?;
        parse_view_output(&output)
    }

    fn describe_publish(&self, package_dir: &Path, registry: &str, tag: &DistTag) -> String {
        render(&self.publish_command(package_dir, registry, tag))
    }
}

/// Pull the version out of `npm view <pkg> version` output.
///
/// npm may print notices around the value, so the last line that is a bare
/// version wins.
pub fn parse_view_output(output: &str) -> Result<Version> {
    output
        .lines()
        .rev()
        .map(|line| line.trim().trim_matches('\''))
        .find_map(|line| VERSION_LINE.captures(line))
        .and_then(|caps| Version::parse(&caps[1]).ok())
        .ok_or_else(|| {
            ReleaseError::registry_query(format!(
                "no version in registry response: '{}'",
                output.trim()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolchain() -> NpmToolchain {
        NpmToolchain::from_config(&Config::default())
    }

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_parse_view_output_plain() {
        assert_eq!(parse_view_output("2.3.1\n").unwrap(), Version::new(2, 3, 1));
    }

    #[test]
    fn test_parse_view_output_with_notices() {
        let output = "npm notice New minor version of npm available!\n1.0.0-beta.2\n";
        assert_eq!(
            parse_view_output(output).unwrap(),
            Version::parse("1.0.0-beta.2").unwrap()
        );
    }

    #[test]
    fn test_parse_view_output_empty() {
        let err = parse_view_output("").unwrap_err();
        assert!(matches!(err, ReleaseError::RegistryQuery(_)));
    }

    #[test]
    fn test_bump_command() {
        let cmd = toolchain().bump_command(
            Path::new("build/rating"),
            &VersionSpecifier::parse("1.2.0").unwrap(),
        );
        assert_eq!(
            args(&cmd),
            vec!["version", "1.2.0", "--no-git-tag-version", "--allow-same-version"]
        );
        assert_eq!(cmd.get_current_dir(), Some(Path::new("build/rating")));
    }

    #[test]
    fn test_changelog_command_with_from() {
        let request = ReleaseRequest {
            version: Version::new(1, 2, 0),
            from: Some("v1.1.0".to_string()),
            git_remote: "upstream".to_string(),
            dry_run: false,
        };
        let cmd = toolchain().changelog_command(&request);
        assert_eq!(cmd.get_program(), "npx");
        let args = args(&cmd);
        assert_eq!(args[0], "release-it");
        assert_eq!(args[1], "1.2.0");
        assert!(args.contains(&"--git.pushRepo=upstream".to_string()));
        assert!(args.iter().any(|a| a.contains("v1.1.0...HEAD")));
    }

    #[test]
    fn test_changelog_command_without_from() {
        let request = ReleaseRequest {
            version: Version::new(1, 2, 0),
            from: None,
            git_remote: "origin".to_string(),
            dry_run: true,
        };
        let args = args(&toolchain().changelog_command(&request));
        assert!(!args.iter().any(|a| a.starts_with("--git.changelog")));
        assert_eq!(args.last().map(String::as_str), Some("--dry-run"));
    }

    #[test]
    fn test_describe_publish() {
        let line = toolchain().describe_publish(
            Path::new("build/rating"),
            "https://registry.npmjs.org/",
            &DistTag::Next,
        );
        assert_eq!(
            line,
            "(cd build/rating && npm publish --registry https://registry.npmjs.org/ --tag next)"
        );
    }

    #[test]
    fn test_query_command() {
        let cmd = toolchain().query_command("@acme/rating", "https://registry.npmjs.org/");
        assert_eq!(
            args(&cmd),
            vec!["view", "@acme/rating", "version", "--registry", "https://registry.npmjs.org/"]
        );
        assert_eq!(cmd.get_current_dir(), None);
    }

    #[test]
    fn test_parse_view_output_repeated_calls() {
        for _ in 0..3 {
            assert_eq!(parse_view_output("v4.0.1\n").unwrap(), Version::new(4, 0, 1));
            assert!(parse_view_output("not a version\n").is_err());
        }
    }
}
