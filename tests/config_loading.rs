use std::io::Write;
use std::path::PathBuf;

use screenplay_cli::cli::runtime::{load_config_from, resolve_config_path};
use screenplay_cli::{DriverKind, ScreenplayConfig};
use serial_test::serial;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn explicit_path_wins() {
    let explicit = PathBuf::from("/tmp/elsewhere/screenplay.yaml");
    assert_eq!(resolve_config_path(Some(&explicit)).unwrap(), explicit);
}

#[tokio::test]
#[serial]
async fn reads_values_from_file() {
    let file = write_config(
        "base_url: \"http://localhost:8080/\"\ntarget_timeout_ms: 750\npoll_interval_ms: 25\n",
    );

    let loaded = load_config_from(file.path()).await.unwrap();
    assert!(loaded.from_file);
    assert_eq!(loaded.path, file.path());
    assert_eq!(loaded.config.base_url, "http://localhost:8080/");
    assert_eq!(loaded.config.target_timeout_ms, 750);
    assert_eq!(loaded.config.poll_interval_ms, 25);
    assert_eq!(loaded.config.driver, DriverKind::InMemory);
    loaded.config.validate().unwrap();
}

#[tokio::test]
#[serial]
async fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_config_from(&dir.path().join("absent.yaml"))
        .await
        .unwrap();
    assert!(!loaded.from_file);
    assert_eq!(loaded.config, ScreenplayConfig::default());
}

#[tokio::test]
#[serial]
async fn malformed_file_is_an_error() {
    let file = write_config("target_timeout_ms: [not, a, number]\n");
    let err = load_config_from(file.path()).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}

#[tokio::test]
#[serial]
async fn environment_overrides_the_file() {
    let file = write_config("target_timeout_ms: 750\n");
    std::env::set_var("SCREENPLAY_TARGET_TIMEOUT_MS", "1500");
    std::env::set_var("SCREENPLAY_API_BASE_URL", "http://127.0.0.1:9000");
    let loaded = load_config_from(file.path()).await;
    std::env::remove_var("SCREENPLAY_TARGET_TIMEOUT_MS");
    std::env::remove_var("SCREENPLAY_API_BASE_URL");

    let config = loaded.unwrap().config;
    assert_eq!(config.target_timeout_ms, 1500);
    assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
}

#[tokio::test]
#[serial]
async fn invalid_override_is_reported() {
    std::env::set_var("SCREENPLAY_ACTION_TIMEOUT_MS", "ten seconds");
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_config_from(&dir.path().join("absent.yaml")).await;
    std::env::remove_var("SCREENPLAY_ACTION_TIMEOUT_MS");

    let err = loaded.unwrap_err();
    assert!(format!("{:#}", err).contains("SCREENPLAY_ACTION_TIMEOUT_MS"));
}
