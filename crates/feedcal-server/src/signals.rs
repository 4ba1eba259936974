//! Shutdown signal handling for the service.
//!
//! SIGTERM and SIGINT (Ctrl+C elsewhere) request a graceful stop. A run in
//! progress is finished before the scheduler exits.

use std::io;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

/// Listens for process signals and fans out a shutdown flag.
pub struct SignalHandler {
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalHandler {
    /// Creates a new signal handler.
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    /// Installs the signal handlers and spawns the listener task.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler cannot be registered.
    #[cfg(unix)]
    pub fn spawn_listener(&self) -> io::Result<()> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let shutdown_tx = self.shutdown_tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => info!("Received SIGTERM, initiating shutdown"),
                _ = sigint.recv() => info!("Received SIGINT, initiating shutdown"),
            }
            let _ = shutdown_tx.send(true);
            debug!("Signal listener stopped");
        });
        Ok(())
    }

    /// Spawns a Ctrl+C listener.
    #[cfg(not(unix))]
    pub fn spawn_listener(&self) -> io::Result<()> {
        let shutdown_tx = self.shutdown_tx.clone();

        tokio::spawn(async move {
            if let Ok(()) = tokio::signal::ctrl_c().await {
                info!("Received Ctrl+C, initiating shutdown");
                let _ = shutdown_tx.send(true);
            }
        });
        Ok(())
    }

    /// Returns a future that completes when a shutdown signal is received.
    pub fn shutdown(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.shutdown_rx.clone(),
        }
    }
}

/// A signal that completes when shutdown is signaled.
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Waits for the shutdown signal.
    pub async fn wait(mut self) {
        // also returns if the sender is gone
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn shutdown_signal_wait() {
        let handler = SignalHandler::new();
        let shutdown = handler.shutdown();

        let tx = handler.shutdown_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let _ = tx.send(true);
        });

        let result = tokio::time::timeout(Duration::from_millis(500), shutdown.wait()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn wait_after_signal_returns_immediately() {
        let handler = SignalHandler::new();
        handler.shutdown_tx.send(true).unwrap();

        let result =
            tokio::time::timeout(Duration::from_millis(100), handler.shutdown().wait()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn wait_blocks_without_signal() {
        let handler = SignalHandler::new();
        let result =
            tokio::time::timeout(Duration::from_millis(20), handler.shutdown().wait()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn listener_installs() {
        let handler = SignalHandler::new();
        handler.spawn_listener().unwrap();
        let result =
            tokio::time::timeout(Duration::from_millis(20), handler.shutdown().wait()).await;
        assert!(result.is_err());
    }
}
