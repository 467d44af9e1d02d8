//! Admin Relay: the browser-facing `/api` routes.
//!
//! Keeps the backend token out of the browser. Login stores it in an
//! http-only cookie, and each admin route forwards to one backend endpoint
//! with the token as a bearer credential.

pub mod error;
pub mod handlers;
pub mod health;
pub mod router;
pub mod session;
pub mod shutdown;
pub mod upstream;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::ConfigStore;
use crate::relay::error::RelayError;
use crate::relay::router::{build_router, AppState};
use crate::relay::shutdown::Shutdown;
use crate::relay::upstream::UpstreamClient;

pub use error::ErrorResponse;

pub struct RelayServer {
    pub addr: SocketAddr,
    /// Populated by bind(), consumed by run().
    listener: Option<TcpListener>,
    state: AppState,
    shutdown: Arc<Shutdown>,
}

impl RelayServer {
    pub fn new(config: ConfigStore) -> Result<Self, RelayError> {
        let upstream = UpstreamClient::new(&config.get().backend)?;
        Ok(Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)), // Will be determined at bind time
            listener: None,
            state: AppState {
                upstream: Arc::new(upstream),
                config,
            },
            shutdown: Arc::new(Shutdown::new()),
        })
    }

    /// Bind the configured address. Port 0 picks a free port.
    ///
    /// The listener is kept until run() so the port cannot be taken in
    /// between.
    pub async fn bind(&mut self) -> Result<SocketAddr, RelayError> {
        let bind_addr = self.state.config.get().relay.bind_addr;
        let addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| RelayError::Internal(format!("Invalid bind address '{}': {}", bind_addr, e)))?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| RelayError::Internal(format!("Failed to bind {}: {}", addr, e)))?;
        let actual = listener
            .local_addr()
            .map_err(|e| RelayError::Internal(e.to_string()))?;

        self.addr = actual;
        self.listener = Some(listener);
        tracing::info!(
            addr = %actual,
            backend = %self.state.upstream.base_url(),
            "Relay bound"
        );
        Ok(actual)
    }

    pub fn handle(&self) -> RelayHandle {
        RelayHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serve until shutdown, then give in-flight requests up to
    /// `relay.drain_timeout_seconds` to finish.
    ///
    /// Consumes self to take ownership of the pre-bound listener.
    pub async fn run(self) -> Result<(), RelayError> {
        let listener = self
            .listener
            .ok_or_else(|| RelayError::Internal("bind() must be called before run()".to_string()))?;
        let drain = Duration::from_secs(self.state.config.get().relay.drain_timeout_seconds);

        tracing::info!("Starting relay on {}", self.addr);

        let app = build_router(self.state.clone());
        let graceful = {
            let shutdown = self.shutdown.clone();
            async move { shutdown.triggered().await }
        };
        let server = axum::serve(listener, app)
            .with_graceful_shutdown(graceful)
            .into_future();
        tokio::pin!(server);

        let signals = self.shutdown.listen_for_signals();

        let finished = tokio::select! {
            result = &mut server => Some(result),
            _ = self.shutdown.triggered() => None,
        };
        let result = match finished {
            Some(result) => result,
            None => {
                tracing::info!(drain_seconds = drain.as_secs(), "Draining in-flight requests");
                match tokio::time::timeout(drain, &mut server).await {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::warn!("Drain budget exceeded, abandoning open connections");
                        Ok(())
                    }
                }
            }
        };
        signals.abort();

        result.map_err(|e| RelayError::Internal(format!("server error: {}", e)))?;
        tracing::info!("Relay stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct RelayHandle {
    shutdown: Arc<Shutdown>,
}

impl RelayHandle {
    pub fn shutdown(&self) {
        self.shutdown.trigger();
    }
}
