//! End-to-end tests for `zoneforge config` commands.

use std::path::Path;
use std::process::{Command, Output};

mod fixtures;
use fixtures::*;

/// Path to the zoneforge binary
fn zoneforge_bin() -> &'static str {
    env!("CARGO_BIN_EXE_zoneforge")
}

/// Creates a Command with isolated config directory for testing.
/// Pass in a config directory path to share between multiple commands in the same test.
fn isolated_config_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(zoneforge_bin());
    cmd.env("ZONEFORGE_CONFIG_DIR", config_dir);
    cmd.args(args);
    cmd
}

fn run(args: &[&str], config_dir: &Path) -> Output {
    isolated_config_command(args, config_dir)
        .output()
        .expect("Failed to execute command")
}

fn show_json(config_dir: &Path) -> serde_json::Value {
    let output = run(&["config", "show", "--json"], config_dir);
    assert_eq!(output.status.code(), Some(0));
    serde_json::from_str(&String::from_utf8_lossy(&output.stdout))
        .expect("Should parse JSON output")
}

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let output = run(&["config", "show"], temp_dir.path());
    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ZoneForge Configuration"));
    assert!(stdout.contains("Default Screen:    pos"));
}

#[test]
fn test_config_show_json_schema() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let result = show_json(temp_dir.path());

    let config_file = result["config_file"].as_str().unwrap();
    assert!(config_file.ends_with("config.toml"));
    assert!(config_file.starts_with(temp_dir.path().to_str().unwrap()));

    let layouts_dir = result["paths"]["layouts_dir"].as_str().unwrap();
    assert!(layouts_dir.ends_with("layouts"));

    assert_eq!(result["editor"]["default_screen"], "pos");
    assert!(result["editor"]["default_theme"].is_null());
    assert_eq!(result["editor"]["strict_validation"], false);
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_screen_and_theme() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let output = run(
        &["config", "set", "--screen", "kds", "--theme", "express"],
        temp_dir.path(),
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Configuration updated"));
    assert!(temp_dir.path().join("config.toml").exists());

    let result = show_json(temp_dir.path());
    assert_eq!(result["editor"]["default_screen"], "kds");
    assert_eq!(result["editor"]["default_theme"], "express");
}

#[test]
fn test_config_clear_theme() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    run(&["config", "set", "--theme", "express"], temp_dir.path());
    let output = run(&["config", "set", "--theme", ""], temp_dir.path());
    assert_eq!(output.status.code(), Some(0));

    assert!(show_json(temp_dir.path())["editor"]["default_theme"].is_null());
}

#[test]
fn test_config_set_invalid_theme() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let output = run(&["config", "set", "--theme", "Fancy Theme"], temp_dir.path());
    assert_eq!(
        output.status.code(),
        Some(1),
        "Setting invalid theme should fail with exit code 1"
    );
    assert!(!temp_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_requires_an_option() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let output = run(&["config", "set"], temp_dir.path());
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_config_set_layouts_dir_creates_if_needed() {
    let config_temp = tempfile::TempDir::new().unwrap();
    let workspace_temp = tempfile::TempDir::new().unwrap();
    let layouts_dir = workspace_temp.path().join("new_layouts_dir");
    assert!(!layouts_dir.exists());

    let output = run(
        &["config", "set", "--layouts-dir", layouts_dir.to_str().unwrap()],
        config_temp.path(),
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(layouts_dir.is_dir());

    let result = show_json(config_temp.path());
    assert_eq!(
        result["paths"]["layouts_dir"].as_str().unwrap(),
        layouts_dir.to_str().unwrap()
    );
}

#[test]
fn test_config_strict_applies_to_validate() {
    let config_temp = tempfile::TempDir::new().unwrap();
    let (layout_path, _layout_dir) = create_temp_layout_file(&test_layout_warnings_only());
    let layout_arg = layout_path.to_str().unwrap();

    let output = run(&["validate", "--layout", layout_arg], config_temp.path());
    assert_eq!(output.status.code(), Some(0));

    let output = run(&["config", "set", "--strict", "true"], config_temp.path());
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(show_json(config_temp.path())["editor"]["strict_validation"], true);

    let output = run(&["validate", "--layout", layout_arg], config_temp.path());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_defaults_apply_to_new() {
    let config_temp = tempfile::TempDir::new().unwrap();
    run(
        &["config", "set", "--screen", "kds", "--theme", "night-shift"],
        config_temp.path(),
    );

    let layout_temp = tempfile::TempDir::new().unwrap();
    let layout_path = layout_temp.path().join("expo.json");
    let output = run(
        &["new", "--name", "Expo", "--layout", layout_path.to_str().unwrap()],
        config_temp.path(),
    );
    assert_eq!(output.status.code(), Some(0));

    let layout = read_layout_file(&layout_path);
    assert_eq!(layout.metadata.screen, zoneforge::models::ScreenType::Kds);
    assert_eq!(layout.theme(), Some("night-shift"));
}

#[test]
fn test_new_without_path_uses_layouts_dir() {
    let config_temp = tempfile::TempDir::new().unwrap();

    let output = run(&["new", "--name", "Patio Bar"], config_temp.path());
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let expected = config_temp.path().join("layouts").join("patio_bar.json");
    assert!(expected.exists());
    assert_eq!(read_layout_file(&expected).metadata.name, "Patio Bar");
}
