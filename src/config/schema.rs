//! Configuration schema definitions.
//!
//! Two kinds of configuration live here:
//! - [`VanityMap`] / [`RepositoryEntry`]: the reloadable document mapping
//!   request paths to upstream repositories.
//! - [`ServerConfig`]: process settings fixed at startup (from the CLI).

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Upstream repository for one vanity path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RepositoryEntry {
    /// Repository location, e.g. `https://github.com/org/foo`.
    pub repo: String,

    /// Space separated `go-source` URL templates (home, directory, file).
    /// Synthesized for GitHub repositories when left empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display: String,
}

impl RepositoryEntry {
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            display: String::new(),
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = display.into();
        self
    }
}

/// Request path → repository entry.
///
/// Ordered so that two loads of the same document compare equal.
pub type VanityMap = BTreeMap<String, RepositoryEntry>;

/// Process settings, immutable after startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Vanity domain prepended to request paths, e.g. `example.com`.
    pub host: String,

    /// Filesystem path or http(s) URL of the vanity document.
    pub config_source: String,

    /// Period between background reloads.
    pub refresh_interval: Duration,

    /// Timeout for fetching a remote document.
    pub fetch_timeout: Duration,

    /// Bind address for the HTTP listener.
    pub bind_address: String,

    /// Documentation site the page redirects to.
    pub doc_url: String,

    /// Reload when a local config file changes on disk.
    pub watch: bool,

    /// Prometheus exporter bind address; exporter disabled when unset.
    pub metrics_address: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            config_source: "/app/config/vanity.yaml".to_string(),
            refresh_interval: Duration::from_secs(120),
            fetch_timeout: Duration::from_secs(30),
            bind_address: "0.0.0.0:80".to_string(),
            doc_url: "https://godoc.org".to_string(),
            watch: false,
            metrics_address: None,
        }
    }
}
