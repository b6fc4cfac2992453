// tests/config_test.rs
use pkg_release::config::{load_config, Config};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.packages_root, PathBuf::from("packages"));
    assert_eq!(config.build_dir, PathBuf::from("build"));
    assert_eq!(config.exclude, vec!["node_modules", "__tests__"]);
    assert_eq!(config.ci_env_var, "CI");
    assert_eq!(config.registry.url, "https://registry.npmjs.org/");
    assert_eq!(config.registry.package, None);
}

#[test]
fn test_default_next_labels() {
    let config = Config::default();
    assert_eq!(config.tags.next_labels, vec!["beta", "rc", "alpha"]);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
packages_root = "libs"
exclude = ["node_modules", "__tests__", "__fixtures__"]
ci_env_var = "GITHUB_ACTIONS"

[registry]
url = "https://npm.example.com/"
package = "@acme/rating"

[tags]
next_labels = ["beta", "rc", "alpha", "canary"]

[tools]
release_tool = "release-it@17"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.packages_root, PathBuf::from("libs"));
    assert_eq!(config.build_dir, PathBuf::from("build"));
    assert!(config.exclude.contains(&"__fixtures__".to_string()));
    assert_eq!(config.ci_env_var, "GITHUB_ACTIONS");
    assert_eq!(config.registry.url, "https://npm.example.com/");
    assert_eq!(config.registry.package.as_deref(), Some("@acme/rating"));
    assert!(config.tags.next_labels.contains(&"canary".to_string()));
    assert_eq!(config.tools.release_tool, "release-it@17");
    assert_eq!(config.tools.npm, "npm");
}

#[test]
fn test_load_fixture() {
    let config = load_config(Some(Path::new("tests/fixtures/pkgrelease.toml")))
        .expect("Failed to load test config");
    assert_eq!(config.auth_token_env, "NPM_TOKEN");
    assert_eq!(config.max_output_bytes, 4096);
}

#[test]
fn test_missing_explicit_file_is_error() {
    let err = load_config(Some(Path::new("tests/fixtures/does-not-exist.toml"))).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
