//! Process-wide stop signal for the vanity server.

use tokio::sync::broadcast;

/// Stops the HTTP listener, both refresh loops and the SIGHUP forwarder.
///
/// Fired by Ctrl+C in the binary and directly by tests. A reload that is
/// mid-fetch when it fires is dropped; the store keeps whatever it held.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire once. Tasks that subscribe afterwards never see it.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
