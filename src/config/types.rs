use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

/// Where the hotel backend lives and how long we wait for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend API (e.g., "http://localhost:8000/api").
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    /// Budget for one call, in seconds (default: 15).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Admin relay (browser-facing `/api` routes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Bind address for the relay server (host:port).
    #[serde(default = "default_relay_bind_addr")]
    pub bind_addr: String,
    /// Mark the session cookie `Secure` (production deployments).
    #[serde(default)]
    pub secure_cookies: bool,
    /// Lifetime of the session cookie in seconds (default: one day).
    #[serde(default = "default_session_max_age")]
    pub session_max_age_seconds: u64,
    /// How long in-flight requests may run after shutdown starts (default: 10).
    #[serde(default = "default_drain_timeout")]
    pub drain_timeout_seconds: u64,
}

/// Infinite-scroll tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Extra pixels around the container viewport that still count as visible.
    #[serde(default = "default_prefetch_margin")]
    pub prefetch_margin_px: f64,
    /// Fraction of the sentinel that must be visible (0.0 - 1.0).
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

fn default_timeout() -> u32 {
    15
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_relay_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_session_max_age() -> u64 {
    60 * 60 * 24
}

fn default_drain_timeout() -> u64 {
    10
}

fn default_prefetch_margin() -> f64 {
    50.0
}

fn default_visibility_threshold() -> f64 {
    0.1
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_relay_bind_addr(),
            secure_cookies: false,
            session_max_age_seconds: default_session_max_age(),
            drain_timeout_seconds: default_drain_timeout(),
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            prefetch_margin_px: default_prefetch_margin(),
            visibility_threshold: default_visibility_threshold(),
        }
    }
}
