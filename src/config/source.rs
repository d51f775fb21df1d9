//! Where the vanity document comes from.
//!
//! The locator given on the command line is classified once at startup:
//! anything that parses as an `http`/`https` URL is fetched remotely,
//! everything else is a filesystem path.

use std::fmt;
use std::path::PathBuf;

use reqwest::StatusCode;
use url::Url;

use crate::config::loader::ConfigError;

/// Location of the vanity document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Http(Url),
}

impl ConfigSource {
    /// Classify a locator string.
    pub fn parse(locator: &str) -> Self {
        match Url::parse(locator) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => ConfigSource::Http(url),
            _ => ConfigSource::File(PathBuf::from(locator)),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ConfigSource::Http(_))
    }

    /// Read the raw document bytes.
    ///
    /// The client carries the fetch timeout; no retries happen here.
    pub async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<u8>, ConfigError> {
        match self {
            ConfigSource::File(path) => {
                tokio::fs::read(path).await.map_err(|e| ConfigError::Read {
                    location: self.to_string(),
                    source: Box::new(e),
                })
            }
            ConfigSource::Http(url) => self.fetch_remote(client, url).await,
        }
    }

    async fn fetch_remote(&self, client: &reqwest::Client, url: &Url) -> Result<Vec<u8>, ConfigError> {
        let response = client.get(url.clone()).send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Config request failed");
            ConfigError::Fetch {
                location: self.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ConfigError::Fetch {
                location: self.to_string(),
                reason: format!("response status code {}", status.as_u16()),
            });
        }

        let body = response.bytes().await.map_err(|e| ConfigError::Read {
            location: self.to_string(),
            source: Box::new(e),
        })?;

        Ok(body.to_vec())
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Http(url) => write!(f, "{}", url),
        }
    }
}
