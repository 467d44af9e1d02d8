//! Configuration: TOML file, defaults, validation and credentials.

mod credentials;
mod loader;
mod store;
mod types;

pub use credentials::{Credential, RequestContext, SecureString};
pub use loader::{ConfigError, BACKEND_URL_ENV};
pub use store::ConfigStore;
pub use types::{BackendConfig, Config, RelayConfig, ScrollConfig};
