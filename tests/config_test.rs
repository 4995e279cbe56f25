//! Tests for client configuration layering.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use noughts_and_crosses::{ClientConfig, PLAYER_ID_ENV, URL_ENV};

#[test]
fn test_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.url(), "ws://localhost:8080/games/play");
    assert_eq!(config.player_id(), "player");
    assert_eq!(config.log_file(), &PathBuf::from("noughts_and_crosses.log"));
}

#[test]
fn test_file_overrides_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("client.toml");
    fs::write(
        &path,
        r#"url = "ws://example.test:9000/play"
player_id = "alice"
"#,
    )
    .expect("Failed to write TOML");

    let config = ClientConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.url(), "ws://example.test:9000/play");
    assert_eq!(config.player_id(), "alice");
    assert_eq!(config.log_file(), &PathBuf::from("noughts_and_crosses.log"));
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "this is not valid toml !!!@@@").expect("Write failed");

    let err = ClientConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse config"), "{}", err);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = ClientConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(err.message.contains("Failed to read config file"), "{}", err);
}

#[test]
fn test_env_then_flags() {
    let config = ClientConfig::default().with_env(|key| match key {
        URL_ENV => Some("ws://env.test/play".to_string()),
        PLAYER_ID_ENV => Some("env-player".to_string()),
        _ => None,
    });
    assert_eq!(config.url(), "ws://env.test/play");
    assert_eq!(config.player_id(), "env-player");

    let config = config.with_overrides(None, Some("flag-player".to_string()), None);
    assert_eq!(config.url(), "ws://env.test/play");
    assert_eq!(config.player_id(), "flag-player");
}
