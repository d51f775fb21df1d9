//! OS signal handling.
//!
//! - SIGHUP → one [`ReloadTrigger::Signal`] per delivery, queued for the scheduler
//! - Ctrl+C → shutdown broadcast
//!
//! The SIGHUP handler is installed before the initial load so an early
//! hang-up cannot fall through to the default action and kill the process.

use tokio::sync::{broadcast, mpsc};

use crate::lifecycle::refresh::ReloadTrigger;
use crate::lifecycle::shutdown::Shutdown;

/// Installed SIGHUP listener.
pub struct ReloadSignals {
    #[cfg(unix)]
    hangup: tokio::signal::unix::Signal,
}

impl ReloadSignals {
    #[cfg(unix)]
    pub fn install() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        let hangup = signal(SignalKind::hangup())?;
        tracing::debug!("SIGHUP handler installed");
        Ok(Self { hangup })
    }

    #[cfg(not(unix))]
    pub fn install() -> std::io::Result<Self> {
        tracing::warn!("Reload signals are not supported on this platform");
        Ok(Self {})
    }

    /// Queue a reload for each hang-up until shutdown or the queue closes.
    #[cfg(unix)]
    pub async fn forward(
        mut self,
        reload_tx: mpsc::UnboundedSender<ReloadTrigger>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                received = self.hangup.recv() => {
                    if received.is_none() {
                        break;
                    }
                    tracing::info!(signal = "SIGHUP", "Received reload signal");
                    if reload_tx.send(ReloadTrigger::Signal).is_err() {
                        tracing::debug!("Reload channel closed, stopping signal forwarder");
                        break;
                    }
                }
                _ = shutdown.recv() => break,
            }
        }
    }

    #[cfg(not(unix))]
    pub async fn forward(
        self,
        _reload_tx: mpsc::UnboundedSender<ReloadTrigger>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let _ = shutdown.recv().await;
    }
}

/// Trigger `shutdown` on Ctrl+C.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
        Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
    }
}
