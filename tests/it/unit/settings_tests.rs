//! Unit tests for settings persistence.

use moodboard::settings::{default_settings_path, Settings, SettingsError};
use moodboard::types::HexColor;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = Settings::default();
    settings.board.color_hex = HexColor::parse("#22c55e").unwrap();
    settings.nudge.large_step = 25.0;
    settings.export.file_name = "board.png".to_string();
    settings.save_to(&path).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_invalid_json_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    let err = Settings::load_from(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Json(_)));
}

#[test]
fn test_invalid_hex_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r##"{"board": {"color_hex": "#12"}}"##).unwrap();
    assert!(Settings::load_from(&path).is_err());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = Settings::load_from(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SettingsError::Io(_)));
}

#[test]
fn test_empty_object_is_all_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{}").unwrap();
    assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
}

#[test]
fn test_default_paths() {
    let settings = default_settings_path();
    assert!(settings.is_some() || cfg!(target_os = "unknown"));
}
