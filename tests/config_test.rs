//! Integration tests for Settings loading from an explicit config file.
//!
//! These assume no FIP_* variables are set in the test environment.

use std::fs;

use tempfile::TempDir;

use fip::application::ApplicationError;
use fip::config::{self, Settings, DEFAULT_API_VERSION};

#[test]
fn given_config_file_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fip.toml");
    fs::write(
        &path,
        r#"
host = "tcp://10.1.2.3:2375"
timeout_secs = 7
"#,
    )
    .unwrap();

    let settings = Settings::load_from(Some(&path)).expect("load settings");

    assert_eq!(settings.host, "tcp://10.1.2.3:2375");
    assert_eq!(settings.timeout_secs, 7);
    // unspecified fields keep defaults
    assert_eq!(settings.api_version.as_deref(), Some(DEFAULT_API_VERSION));
    assert!(settings.token.is_none());
}

#[test]
fn given_no_config_file_when_load_then_defaults() {
    let settings = Settings::load_from(None).expect("load defaults");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fip.toml");
    fs::write(&path, "host = [unclosed").unwrap();

    let err = Settings::load_from(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("parse"));
}

#[test]
fn given_missing_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let err = Settings::load_from(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_zero_timeout_in_file_when_load_then_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fip.toml");
    fs::write(&path, "timeout_secs = 0\n").unwrap();

    assert!(Settings::load_from(Some(&path)).is_err());
}

#[test]
fn given_template_written_when_loading_then_equals_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("fip.toml");

    config::write_template(&path).unwrap();
    let settings = Settings::load_from(Some(&path)).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_existing_file_when_writing_template_then_refuses() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fip.toml");
    fs::write(&path, "host = \"http://keep.me\"\n").unwrap();

    let err = config::write_template(&path).unwrap_err();

    assert!(err.to_string().contains("already exists"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "host = \"http://keep.me\"\n"
    );
}
