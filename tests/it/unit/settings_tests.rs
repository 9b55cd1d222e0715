//! Unit tests for settings module.

use data_sweeper::settings::{Settings, default_settings_path};
use data_sweeper::types::{FileFormat, Theme};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("absent.json"));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.theme, Theme::Dark);
    assert_eq!(settings.preview_rows, 5);
}

#[test]
fn test_malformed_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();
    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"theme": "light", "default_export_format": "excel"}"#).unwrap();

    let settings = Settings::load_from(&path);
    assert_eq!(settings.theme, Theme::Light);
    assert_eq!(settings.default_export_format, Some(FileFormat::Excel));
    assert_eq!(settings.max_upload_mb, 200);
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let settings = Settings {
        theme: Theme::Light,
        preview_rows: 10,
        ..Settings::default()
    };
    settings.save_to(&path).unwrap();

    assert_eq!(Settings::load_from(&path), settings);
}

#[test]
fn test_default_paths() {
    // These should return Some on most systems
    let settings = default_settings_path();
    assert!(settings.is_some() || cfg!(target_os = "unknown"));
}
