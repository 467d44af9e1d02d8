//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;
pub mod scripted;

use hotel_admin::config::{BackendConfig, Config, RelayConfig};
use serde_json::{json, Value};
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Config pointing at `base_url` with a short call budget.
pub fn test_config(base_url: &str, timeout_seconds: u32) -> Config {
    Config {
        backend: BackendConfig {
            base_url: base_url.to_string(),
            timeout_seconds,
            connect_timeout_seconds: 1,
        },
        relay: RelayConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            ..RelayConfig::default()
        },
        ..Config::default()
    }
}

/// Write `content` to a config.toml inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Wait for a server to become available.
pub async fn wait_for_server(addr: SocketAddr, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

// -- Backend payloads ---------------------------------------------------------

pub fn booking_json(id: u64) -> Value {
    json!({
        "id": id,
        "booking_ref": format!("BK-{:04}", id),
        "name": format!("Guest {}", id),
        "email": format!("guest{}@example.com", id),
        "status": "pending",
        "payment_status": "pending",
        "check_in": "2024-05-01",
        "check_out": "2024-05-03",
        "room": { "id": 1, "name": "Standard" }
    })
}

/// `{ "bookings": { data, current_page, last_page } }`
pub fn bookings_page(ids: &[u64], current_page: u32, last_page: u32) -> Value {
    json!({
        "bookings": {
            "data": ids.iter().map(|id| booking_json(*id)).collect::<Vec<_>>(),
            "current_page": current_page,
            "last_page": last_page,
        }
    })
}

pub fn checkins_page(ids: &[u64], current_page: u32, last_page: u32) -> Value {
    bookings_page(ids, current_page, last_page)
}

pub fn room_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "slug": name.to_lowercase().replace(' ', "-"),
        "price": 100.0 + id as f64,
        "capacity": 2,
        "description": "",
        "images": []
    })
}
