//! Integration tests for Settings config loading with layered precedence.
//!
//! `XDG_CONFIG_HOME` points into a temp dir for the whole test binary, so a
//! real `~/.config/paramtree/paramtree.toml` is never read.
//!
//! Note: only `given_env_override_when_load_then_env_wins` touches
//! `PARAMTREE_MAX_DEPTH` or writes a global config; the other tests never
//! assert on `max_depth` after `Settings::load()`.

use std::fs;

use tempfile::TempDir;

use paramtree::application::ApplicationError;
use paramtree::config::{global_config_path, load_raw_settings, Settings};
use paramtree::parser::MAX_DEPTH_LIMIT;

#[ctor::ctor]
fn isolate_global_config() {
    let home = std::env::temp_dir().join(format!("paramtree-config-test-{}", std::process::id()));
    std::env::set_var("XDG_CONFIG_HOME", home);
}

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("paramtree.toml");
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn given_explicit_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "strict = true\n");

    // Act
    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    // Assert
    assert!(settings.strict);
}

#[test]
fn given_partial_config_when_merging_then_keeps_unspecified_values() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "max_depth = 5\n");

    // Act
    let raw = load_raw_settings(&path).unwrap();
    let settings = Settings::default().merge_with(&raw);

    // Assert
    assert_eq!(settings.max_depth, 5);
    assert!(!settings.strict);
}

#[test]
fn given_malformed_config_when_load_then_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "max_depth = \"deep\"\n");

    let result = Settings::load(Some(path.as_path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_missing_config_file_when_load_then_errors() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(dir.path().join("absent.toml").as_path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_depth_above_limit_when_validating_then_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &format!("max_depth = {}\n", MAX_DEPTH_LIMIT + 1));

    let settings = Settings::default().merge_with(&load_raw_settings(&path).unwrap());

    assert_eq!(settings.max_depth, MAX_DEPTH_LIMIT + 1);
    assert!(matches!(
        settings.validate(),
        Err(ApplicationError::Config { .. })
    ));
}

#[test]
fn given_env_override_when_load_then_env_wins() {
    // Arrange
    let xdg = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", xdg.path());
    let global = global_config_path().expect("global config path");
    assert!(global.starts_with(xdg.path()));
    fs::create_dir_all(global.parent().unwrap()).unwrap();
    fs::write(&global, "max_depth = 9\n").unwrap();

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "max_depth = 3\n");
    std::env::set_var("PARAMTREE_MAX_DEPTH", "7");

    // Act
    let from_env = Settings::load(Some(path.as_path()));
    std::env::remove_var("PARAMTREE_MAX_DEPTH");
    let from_files = Settings::load(Some(path.as_path()));
    let from_global = Settings::load(None);

    // Assert
    assert_eq!(from_env.expect("load settings").max_depth, 7);
    assert_eq!(from_files.expect("load settings").max_depth, 3);
    assert_eq!(from_global.expect("load settings").max_depth, 9);
}
