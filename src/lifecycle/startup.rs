//! Startup orchestration.
//!
//! # Order
//! 1. Build the loader and an empty store
//! 2. Install the SIGHUP handler
//! 3. Initial synchronous load (failure is logged, server still starts empty)
//! 4. Spawn interval refresh, on-demand refresh, signal forwarder, file watcher
//! 5. Serve HTTP until shutdown

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::watcher::ConfigWatcher;
use crate::config::{ConfigError, ConfigLoader, ConfigSource, ConfigStore, ServerConfig};
use crate::http::HttpServer;
use crate::lifecycle::refresh::{RefreshScheduler, ReloadTrigger, Reloader};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::ReloadSignals;

/// Fatal errors while bringing the service up.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("config loader: {0}")]
    Config(#[from] ConfigError),

    #[error("signal handler: {0}")]
    Signal(#[source] std::io::Error),

    #[error("config watcher: {0}")]
    Watch(#[from] notify::Error),

    #[error("http server: {0}")]
    Server(#[source] std::io::Error),
}

/// A fully wired vanity service, ready to run.
pub struct VanityApp {
    config: ServerConfig,
    source: ConfigSource,
    reloader: Arc<Reloader>,
    reload_tx: mpsc::UnboundedSender<ReloadTrigger>,
    reload_rx: mpsc::UnboundedReceiver<ReloadTrigger>,
}

impl VanityApp {
    pub fn new(config: ServerConfig) -> Result<Self, StartupError> {
        let source = ConfigSource::parse(&config.config_source);
        let loader = ConfigLoader::new(source.clone(), config.fetch_timeout)?;
        let reloader = Arc::new(Reloader::new(loader, ConfigStore::new()));
        let (reload_tx, reload_rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            source,
            reloader,
            reload_tx,
            reload_rx,
        })
    }

    /// Handle on the shared store.
    pub fn store(&self) -> ConfigStore {
        self.reloader.store().clone()
    }

    /// Sender that queues out-of-band reloads, same path as SIGHUP.
    pub fn reload_handle(&self) -> mpsc::UnboundedSender<ReloadTrigger> {
        self.reload_tx.clone()
    }

    /// Load, start background refresh and serve on `listener` until shutdown.
    pub async fn run(self, listener: TcpListener, shutdown: &Shutdown) -> Result<(), StartupError> {
        let signals = ReloadSignals::install().map_err(StartupError::Signal)?;

        if let Err(e) = self.reloader.reload(ReloadTrigger::Startup).await {
            tracing::warn!(error = %e, "Initial config load failed, serving empty mapping");
        }

        let scheduler = RefreshScheduler::new(self.reloader.clone(), self.config.refresh_interval);
        tokio::spawn(scheduler.clone().run_interval(shutdown.subscribe()));
        tokio::spawn(scheduler.run_on_demand(self.reload_rx, shutdown.subscribe()));
        tokio::spawn(signals.forward(self.reload_tx.clone(), shutdown.subscribe()));

        // Keep the watcher alive for as long as the server runs.
        let _watcher = match (&self.source, self.config.watch) {
            (ConfigSource::File(path), true) => {
                Some(ConfigWatcher::new(path, self.reload_tx.clone()).run()?)
            }
            (ConfigSource::Http(_), true) => {
                tracing::warn!("--watch ignored for remote config source");
                None
            }
            _ => None,
        };

        let server = HttpServer::new(&self.config, self.reloader.store().clone());
        server
            .run(listener, shutdown.subscribe())
            .await
            .map_err(StartupError::Server)
    }
}
