//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface,
//! validating lazy loading, key lookup, and tolerance of missing or broken files.

use browser_shell::services::settings_engine::{
    SettingsEngine, SettingsEngineTrait, START_PAGE_KEY, START_PAGE_PREVIOUS,
};
use browser_shell::types::errors::SettingsError;
use serde_json::json;
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

fn write_settings(dir: &TempDir, content: &str) {
    std::fs::write(dir.path().join("settings.json"), content).unwrap();
}

/// When no config file exists on disk, every key is absent and startup proceeds.
#[tokio::test]
async fn test_missing_file_yields_no_values() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in_temp(&dir);

    assert_eq!(engine.get(START_PAGE_KEY).await, None);
    assert_eq!(engine.load().await.unwrap(), json!({}));
}

#[tokio::test]
async fn test_reads_start_page_preference() {
    let dir = TempDir::new().unwrap();
    write_settings(&dir, r#"{"startPage": "previous", "theme": "dark"}"#);
    let engine = engine_in_temp(&dir);

    assert_eq!(engine.get(START_PAGE_KEY).await, Some(json!(START_PAGE_PREVIOUS)));
    assert_eq!(engine.get("theme").await, Some(json!("dark")));
}

#[tokio::test]
async fn test_dot_keys_walk_nested_objects() {
    let dir = TempDir::new().unwrap();
    write_settings(&dir, r#"{"general": {"startup": {"page": "previous"}}, "a.b": 1}"#);
    let engine = engine_in_temp(&dir);

    assert_eq!(engine.get("general.startup.page").await, Some(json!("previous")));
    // A literal dotted key wins over the nested path.
    assert_eq!(engine.get("a.b").await, Some(json!(1)));
    assert_eq!(engine.get("general.missing").await, None);
    assert_eq!(engine.get("").await, None);
}

/// The file is read once; later edits are not observed by the same engine.
#[tokio::test]
async fn test_values_are_loaded_once() {
    let dir = TempDir::new().unwrap();
    write_settings(&dir, r#"{"startPage": "newtab"}"#);
    let engine = engine_in_temp(&dir);

    assert_eq!(engine.get(START_PAGE_KEY).await, Some(json!("newtab")));
    write_settings(&dir, r#"{"startPage": "previous"}"#);
    assert_eq!(engine.get(START_PAGE_KEY).await, Some(json!("newtab")));
}

#[tokio::test]
async fn test_malformed_file_is_an_error_but_get_degrades() {
    let dir = TempDir::new().unwrap();
    write_settings(&dir, "{ definitely not json");
    let engine = engine_in_temp(&dir);

    assert!(matches!(
        engine.load().await,
        Err(SettingsError::SerializationError(_))
    ));
    assert_eq!(engine.get(START_PAGE_KEY).await, None);
}

#[tokio::test]
async fn test_non_object_root_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_settings(&dir, "[1, 2, 3]");
    let engine = engine_in_temp(&dir);

    assert!(engine.load().await.is_err());
}

#[tokio::test]
async fn test_with_values_never_reads_disk() {
    let mut values = serde_json::Map::new();
    values.insert(START_PAGE_KEY.to_string(), json!("previous"));
    let engine = SettingsEngine::with_values(values);

    assert_eq!(engine.get(START_PAGE_KEY).await, Some(json!("previous")));
    assert_eq!(engine.get_config_path(), "");
}

#[test]
fn test_default_path_is_in_config_dir() {
    let engine = SettingsEngine::new(None);
    let path = std::path::PathBuf::from(engine.get_config_path());
    assert!(path.ends_with("settings.json"));
    assert!(path.starts_with(browser_shell::platform::get_config_dir()));
}
