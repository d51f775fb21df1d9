//! Periodic and on-demand reloading of the vanity mapping.
//!
//! # Responsibilities
//! - Run the reload pipeline (fetch → parse → validate → enrich → replace)
//! - Drive it on a fixed interval
//! - Drive it once per queued trigger (SIGHUP, file change, manual)
//!
//! # Design Decisions
//! - Reload errors are logged and swallowed; the store keeps the last good map
//! - Triggers are consumed one at a time in arrival order, none are coalesced
//! - No backoff: the next tick or trigger is the retry

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use crate::config::{ConfigError, ConfigLoader, ConfigStore};
use crate::observability::metrics;

/// What caused a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTrigger {
    Startup,
    Interval,
    Signal,
    FileChanged,
    Manual,
}

impl ReloadTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadTrigger::Startup => "startup",
            ReloadTrigger::Interval => "interval",
            ReloadTrigger::Signal => "signal",
            ReloadTrigger::FileChanged => "file_changed",
            ReloadTrigger::Manual => "manual",
        }
    }
}

impl fmt::Display for ReloadTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loads the vanity document and installs it into the store.
#[derive(Debug)]
pub struct Reloader {
    loader: ConfigLoader,
    store: ConfigStore,
}

impl Reloader {
    pub fn new(loader: ConfigLoader, store: ConfigStore) -> Self {
        Self { loader, store }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Run one reload. On error the store is left untouched.
    ///
    /// Returns the number of entries installed.
    pub async fn reload(&self, trigger: ReloadTrigger) -> Result<usize, ConfigError> {
        tracing::info!(
            trigger = %trigger,
            source = %self.loader.source(),
            "Refreshing vanity config"
        );

        match self.loader.load().await {
            Ok(map) => {
                let entries = map.len();
                self.store.replace(map);
                metrics::record_reload(trigger.as_str(), "success");
                metrics::record_config_entries(entries);
                tracing::info!(trigger = %trigger, entries, "Vanity config refreshed");
                Ok(entries)
            }
            Err(e) => {
                metrics::record_reload(trigger.as_str(), "failure");
                tracing::error!(
                    trigger = %trigger,
                    source = %self.loader.source(),
                    error = %e,
                    "Failed to refresh vanity config, keeping current mapping"
                );
                Err(e)
            }
        }
    }
}

/// Drives [`Reloader`] from a timer and from a queue of triggers.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    reloader: Arc<Reloader>,
    period: Duration,
}

impl RefreshScheduler {
    pub fn new(reloader: Arc<Reloader>, period: Duration) -> Self {
        Self { reloader, period }
    }

    /// Reload every `period` until shutdown.
    ///
    /// The first reload happens one period after start; startup performs
    /// its own initial load.
    pub async fn run_interval(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(interval = ?self.period, "Interval refresh starting");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.period) => {
                    // Errors are already logged by the reloader.
                    let _ = self.reloader.reload(ReloadTrigger::Interval).await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Interval refresh received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Perform exactly one reload per received trigger until the channel
    /// closes or shutdown fires.
    pub async fn run_on_demand(
        self,
        mut triggers: mpsc::UnboundedReceiver<ReloadTrigger>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                trigger = triggers.recv() => {
                    let Some(trigger) = trigger else {
                        tracing::debug!("Reload channel closed");
                        break;
                    };
                    let _ = self.reloader.reload(trigger).await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("On-demand refresh received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
