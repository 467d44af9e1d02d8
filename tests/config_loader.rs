mod common;

use std::path::PathBuf;

use common::temp_config;
use hotel_admin::config::{Config, ConfigError, ConfigStore};

/// Defaults match a local backend and the stock scroll tuning.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.backend.base_url, "http://127.0.0.1:8000/api");
    assert_eq!(config.backend.timeout_seconds, 15);
    assert_eq!(config.backend.connect_timeout_seconds, 5);
    assert_eq!(config.relay.bind_addr, "127.0.0.1:3000");
    assert!(!config.relay.secure_cookies);
    assert_eq!(config.relay.session_max_age_seconds, 86_400);
    assert_eq!(config.relay.drain_timeout_seconds, 10);
    assert_eq!(config.scroll.prefetch_margin_px, 50.0);
    assert_eq!(config.scroll.visibility_threshold, 0.1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("hotel-admin/config.toml"));
}

#[test]
fn test_missing_file_gives_defaults() {
    let path = PathBuf::from("/nonexistent/hotel-admin/config.toml");
    let config = Config::load_from(&path).expect("missing file is not an error");
    assert_eq!(config.backend.timeout_seconds, 15);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = temp_config(
        r#"
[backend]
base_url = "https://hotel.example/api"
timeout_seconds = 30

[scroll]
prefetch_margin_px = 120.0
"#,
    );

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.backend.base_url, "https://hotel.example/api");
    assert_eq!(config.backend.timeout_seconds, 30);
    assert_eq!(config.backend.connect_timeout_seconds, 5);
    assert_eq!(config.scroll.prefetch_margin_px, 120.0);
    assert_eq!(config.scroll.visibility_threshold, 0.1);
    assert_eq!(config.relay.bind_addr, "127.0.0.1:3000");
}

#[test]
fn test_relay_section() {
    let (_dir, path) = temp_config(
        r#"
[relay]
bind_addr = "0.0.0.0:8080"
secure_cookies = true
session_max_age_seconds = 3600
drain_timeout_seconds = 2
"#,
    );

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.relay.bind_addr, "0.0.0.0:8080");
    assert!(config.relay.secure_cookies);
    assert_eq!(config.relay.session_max_age_seconds, 3600);
    assert_eq!(config.relay.drain_timeout_seconds, 2);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = temp_config("[backend\nbase_url = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases = [
        "[backend]\nbase_url = \"ftp://hotel\"\n",
        "[backend]\ntimeout_seconds = 0\n",
        "[relay]\nbind_addr = \"not an address\"\n",
        "[scroll]\nvisibility_threshold = 1.5\n",
        "[scroll]\nprefetch_margin_px = -1.0\n",
    ];

    for content in cases {
        let (_dir, path) = temp_config(content);
        let err = Config::load_from(&path).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { .. }),
            "expected validation error for {:?}, got {:?}",
            content,
            err
        );
    }
}

#[test]
fn test_store_reload_keeps_old_config_on_error() {
    let (_dir, path) = temp_config("[backend]\ntimeout_seconds = 20\n");
    let store = ConfigStore::new(Config::load_from(&path).unwrap(), path.clone());

    std::fs::write(&path, "[backend]\ntimeout_seconds = 45\n").unwrap();
    store.reload().unwrap();
    assert_eq!(store.get().backend.timeout_seconds, 45);

    std::fs::write(&path, "[backend]\ntimeout_seconds = 0\n").unwrap();
    assert!(store.reload().is_err());
    assert_eq!(store.get().backend.timeout_seconds, 45);
    assert_eq!(store.path(), path.as_path());
}
