//! Configuration file watcher for hot reload.
//!
//! Only meaningful for local sources. The watcher does not load anything
//! itself; it queues a reload trigger and lets the scheduler do the work.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::lifecycle::refresh::ReloadTrigger;

/// A watcher that monitors the vanity document for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    reload_tx: mpsc::UnboundedSender<ReloadTrigger>,
}

impl ConfigWatcher {
    pub fn new(path: &Path, reload_tx: mpsc::UnboundedSender<ReloadTrigger>) -> Self {
        Self {
            path: path.to_path_buf(),
            reload_tx,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.reload_tx.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(paths = ?event.paths, "Config file change detected");
                        if tx.send(ReloadTrigger::FileChanged).is_err() {
                            tracing::debug!("Reload channel closed, dropping file event");
                        }
                    }
                }
                Err(e) => tracing::error!(error = %e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_change_queues_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vanity.yaml");
        std::fs::write(&path, "/a:\n  repo: https://github.com/org/a\n").unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let _watcher = ConfigWatcher::new(&path, tx).run().unwrap();

        std::fs::write(&path, "/b:\n  repo: https://github.com/org/b\n").unwrap();

        let trigger = tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("no file event within timeout");
        assert_eq!(trigger, Some(ReloadTrigger::FileChanged));
    }
}
