//! Integration tests for Settings config loading with layered precedence.
//!
//! Precedence: defaults → global file → local file → environment variables.
//! Each layer replaces only the keys it specifies.
//!
//! Note: These tests pass explicit file locations so a real global config
//! on the test machine never leaks in.

use std::fs;
use std::sync::Mutex;

use tempfile::TempDir;

use genreguide::config::{local_config_path, OutputFormat, Settings};
use genreguide::ApplicationError;

/// Environment variables are process-wide; tests touching them run one at a time.
static ENV_LOCK: Mutex<()> = Mutex::new(());

// ============================================================
// File layers
// ============================================================

#[test]
fn given_no_config_files_when_load_then_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();

    let settings = Settings::load_from(
        Some(dir.path().join("missing.toml").as_path()),
        Some(local_config_path(dir.path()).as_path()),
    )
    .expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_global_and_local_config_when_load_then_local_overrides_global() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    // Arrange
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("genreguide.toml");
    fs::write(
        &global,
        r#"
[output]
format = "json"
color = false

[catalog]
fail_fast = true
"#,
    )
    .unwrap();
    let local = local_config_path(dir.path());
    fs::write(
        &local,
        r#"
[output]
format = "flat"
"#,
    )
    .unwrap();

    // Act
    let settings =
        Settings::load_from(Some(global.as_path()), Some(local.as_path())).expect("load settings");

    // Assert
    assert_eq!(settings.output.format, OutputFormat::Flat, "local wins");
    assert!(!settings.output.color, "global value kept");
    assert!(settings.catalog.fail_fast, "global value kept");
    assert!(settings.catalog.qualify, "default kept");
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let local = local_config_path(dir.path());
    fs::write(&local, "[output\nformat = ").unwrap();

    let result = Settings::load_from(None, Some(local.as_path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_unknown_format_when_load_then_config_error() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let local = local_config_path(dir.path());
    fs::write(&local, "[output]\nformat = \"yaml\"\n").unwrap();

    let result = Settings::load_from(None, Some(local.as_path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

// ============================================================
// Environment overrides
// ============================================================

#[test]
fn given_env_vars_when_load_then_override_files() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    // Arrange
    let dir = TempDir::new().unwrap();
    let local = local_config_path(dir.path());
    fs::write(&local, "[output]\nformat = \"flat\"\n").unwrap();
    std::env::set_var("GENREGUIDE_OUTPUT__FORMAT", "text");
    std::env::set_var("GENREGUIDE_CATALOG__QUALIFY", "false");

    // Act
    let result = Settings::load_from(None, Some(local.as_path()));
    std::env::remove_var("GENREGUIDE_OUTPUT__FORMAT");
    std::env::remove_var("GENREGUIDE_CATALOG__QUALIFY");

    // Assert
    let settings = result.expect("load settings");
    assert_eq!(settings.output.format, OutputFormat::Text);
    assert!(!settings.catalog.qualify);
}

#[test]
fn given_settings_when_rendering_toml_then_loads_back_identically() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let mut settings = Settings::default();
    settings.output.format = OutputFormat::Json;
    settings.catalog.fail_fast = true;
    let local = local_config_path(dir.path());
    fs::write(&local, settings.to_toml().unwrap()).unwrap();

    let loaded = Settings::load_from(None, Some(local.as_path())).expect("load settings");

    assert_eq!(loaded, settings);
}
