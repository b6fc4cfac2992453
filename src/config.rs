use crate::domain::dist_tag::default_next_labels;
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "pkgrelease.toml";

/// Represents the complete configuration for pkg-release.
///
/// Contains the staging layout, environment variable names, registry settings,
/// tag rules, and the names of the external tools that are invoked.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_packages_root")]
    pub packages_root: PathBuf,

    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    #[serde(default = "default_ci_env_var")]
    pub ci_env_var: String,

    #[serde(default = "default_auth_token_env")]
    pub auth_token_env: String,

    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: usize,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_packages_root() -> PathBuf {
    PathBuf::from("packages")
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

/// Path substrings skipped while staging: dependency caches and test directories.
fn default_exclude() -> Vec<String> {
    vec!["node_modules".to_string(), "__tests__".to_string()]
}

fn default_ci_env_var() -> String {
    "CI".to_string()
}

fn default_auth_token_env() -> String {
    "NODE_AUTH_TOKEN".to_string()
}

fn default_max_output_bytes() -> usize {
    1024 * 1024
}

fn default_registry_url() -> String {
    "https://registry.npmjs.org/".to_string()
}

/// Registry the publish path uploads to and queries.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Package whose published version decides `previous` vs `latest`.
    /// Falls back to the first staged package's manifest name.
    #[serde(default)]
    pub package: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            url: default_registry_url(),
            package: None,
        }
    }
}

/// Rules for distribution tag resolution.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagsConfig {
    #[serde(default = "default_next_labels")]
    pub next_labels: Vec<String>,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            next_labels: default_next_labels(),
        }
    }
}

fn default_npm() -> String {
    "npm".to_string()
}

fn default_npx() -> String {
    "npx".to_string()
}

fn default_release_tool() -> String {
    "release-it".to_string()
}

/// Names of the external programs the toolchain shells out to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ToolsConfig {
    #[serde(default = "default_npm")]
    pub npm: String,

    #[serde(default = "default_npx")]
    pub npx: String,

    #[serde(default = "default_release_tool")]
    pub release_tool: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            npm: default_npm(),
            npx: default_npx(),
            release_tool: default_release_tool(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            packages_root: default_packages_root(),
            build_dir: default_build_dir(),
            exclude: default_exclude(),
            ci_env_var: default_ci_env_var(),
            auth_token_env: default_auth_token_env(),
            max_output_bytes: default_max_output_bytes(),
            registry: RegistryConfig::default(),
            tags: TagsConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `pkgrelease.toml` in current directory
/// 3. `.pkgrelease.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_config.exists() {
            user_config
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading config");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str)
        .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))
}

/// Parses configuration from TOML text, applying defaults for missing keys.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).map_err(|e| ReleaseError::config(e.to_string()))?;
    if config.max_output_bytes == 0 {
        return Err(ReleaseError::config("max_output_bytes must be greater than 0"));
    }
    Ok(config)
}
