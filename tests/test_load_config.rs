use std::fs::write;
use std::path::PathBuf;

use ci_diff_helper::config::Config;
use ci_diff_helper::load_config::{load_config, load_config_or_default};
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("temp file");
    write(file.path(), contents).unwrap();
    file
}

/// A full config overrides every default.
#[test]
fn test_load_config_full() {
    let file = config_file(
        r#"
env:
  in_ci: GITHUB_ACTIONS
  in_ci_value: "true"
  pull_request: PR_NUMBER
  branch: GITHUB_REF_NAME
git:
  program: /usr/local/bin/git
docs:
  index_file: documentation/index.rst
  package: my_pkg
  title: "``my-pkg``"
"#,
    );

    let config = load_config(file.path()).expect("Config should load");

    assert_eq!(config.env.in_ci, "GITHUB_ACTIONS");
    assert_eq!(config.env.pull_request, "PR_NUMBER");
    assert_eq!(config.env.branch, "GITHUB_REF_NAME");
    assert_eq!(config.git.program, "/usr/local/bin/git");
    assert_eq!(config.docs.index_file, PathBuf::from("documentation/index.rst"));
    assert_eq!(config.docs.package, "my_pkg");
    assert_eq!(config.docs.title, "``my-pkg``");
}

/// Fields left out keep their Travis defaults.
#[test]
fn test_load_config_partial_keeps_defaults() {
    let file = config_file("env:\n  branch: CI_BRANCH\n");

    let config = load_config(file.path()).expect("Config should load");

    assert_eq!(config.env.branch, "CI_BRANCH");
    assert_eq!(config.env.in_ci, "TRAVIS");
    assert_eq!(config.env.in_ci_value, "true");
    assert_eq!(config.env.pull_request, "TRAVIS_PULL_REQUEST");
    assert_eq!(config.git.program, "git");
    assert_eq!(config.docs.index_file, PathBuf::from("docs/index.rst"));
}

#[test]
fn test_load_config_empty_file_is_default() {
    let file = config_file("");
    assert_eq!(load_config(file.path()).unwrap(), Config::default());
}

#[test]
fn test_load_config_errors_for_invalid_file() {
    let file = config_file("not-yaml: [:::");
    let msg = load_config(file.path()).unwrap_err().to_string();
    assert!(msg.contains("parse") || msg.contains("YAML"), "Parse error expected, got: {msg}");
}

#[test]
fn test_load_config_errors_for_unknown_section() {
    let file = config_file("travis:\n  branch: X\n");
    let msg = load_config(file.path()).unwrap_err().to_string();
    assert!(msg.contains("YAML"), "Parse error expected, got: {msg}");
}

#[test]
fn test_load_config_errors_for_empty_variable_name() {
    let file = config_file("env:\n  branch: \"\"\n");
    let msg = load_config(file.path()).unwrap_err().to_string();
    assert!(msg.contains("must not be empty"), "got: {msg}");
}

#[test]
fn test_load_config_errors_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    let msg = load_config(&missing).unwrap_err().to_string();
    assert!(msg.contains("Failed to read config file"), "got: {msg}");
}

#[test]
fn test_load_config_or_default_without_path() {
    let config = load_config_or_default(None::<PathBuf>).unwrap();
    assert_eq!(config, Config::default());
}
