//! Shutdown trigger for the relay.
//!
//! Once triggered, the server stops accepting connections and lets
//! in-flight requests finish within the configured drain budget.

use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Latched flag shared by the server, its handle and the signal listener.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`trigger`](Self::trigger) has been called, including
    /// calls made before this future was created.
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so this cannot observe a closed channel.
        let _ = rx.wait_for(|triggered| *triggered).await;
    }

    /// Trigger on Ctrl-C or SIGTERM. The returned task should be aborted
    /// once the server has stopped.
    pub fn listen_for_signals(self: &Arc<Self>) -> JoinHandle<()> {
        let shutdown = Arc::clone(self);
        tokio::spawn(async move {
            match os_signal().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                    shutdown.trigger();
                }
                Err(e) => tracing::warn!(error = %e, "signal handler failed"),
            }
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
async fn os_signal() -> Result<(), std::io::Error> {
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    tokio::select! {
        result = signal::ctrl_c() => result,
        _ = sigterm.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn os_signal() -> Result<(), std::io::Error> {
    signal::ctrl_c().await
}
