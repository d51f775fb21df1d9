//! Configuration loading: fetch, decode, validate, enrich.

use std::time::Duration;

use thiserror::Error;

use crate::config::schema::VanityMap;
use crate::config::source::ConfigSource;
use crate::config::validation::{enrich_map, validate_map, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Remote source unreachable, timed out, or answered with a non-200 status.
    #[error("failed to fetch {location}: {reason}")]
    Fetch { location: String, reason: String },

    /// Local file or response body could not be read.
    #[error("failed to read {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fetches and parses the vanity document from a fixed source.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    source: ConfigSource,
    client: reqwest::Client,
}

impl ConfigLoader {
    /// Build a loader whose remote fetches are bounded by `fetch_timeout`.
    pub fn new(source: ConfigSource, fetch_timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| ConfigError::Fetch {
                location: source.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { source, client })
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Produce a fresh, validated and enriched mapping.
    pub async fn load(&self) -> Result<VanityMap, ConfigError> {
        let bytes = self.source.fetch(&self.client).await?;
        parse_config(&bytes)
    }
}

/// Decode a YAML document into a validated, enriched mapping.
///
/// An empty document (blank or comments only) is an empty mapping.
pub fn parse_config(bytes: &[u8]) -> Result<VanityMap, ConfigError> {
    if is_blank_document(bytes) {
        return Ok(VanityMap::new());
    }

    let mut map = serde_yaml::from_slice::<Option<VanityMap>>(bytes)?.unwrap_or_default();

    validate_map(&map).map_err(ConfigError::Validation)?;
    enrich_map(&mut map);

    Ok(map)
}

fn is_blank_document(bytes: &[u8]) -> bool {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::github_display;

    const DOC: &str = r#"
/foo:
  repo: https://github.com/org/foo
/bar:
  repo: https://git.example.com/bar
/baz:
  repo: https://github.com/org/baz
  display: "custom display"
"#;

    #[test]
    fn test_parse_and_enrich() {
        let map = parse_config(DOC.as_bytes()).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["/foo"].display, github_display("https://github.com/org/foo"));
        assert!(map["/bar"].display.is_empty());
        assert_eq!(map["/baz"].display, "custom display");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let first = parse_config(DOC.as_bytes()).unwrap();
        let second = parse_config(DOC.as_bytes()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = parse_config(b"/foo: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_missing_repo_fails_whole_document() {
        let doc = "/ok:\n  repo: https://github.com/org/ok\n/broken:\n  display: x\n";
        let err = parse_config(doc.as_bytes()).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors, vec![ValidationError::MissingRepo { path: "/broken".into() }]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_document_is_empty_map() {
        assert!(parse_config(b"").unwrap().is_empty());
        assert!(parse_config(b"\n# nothing yet\n  \n").unwrap().is_empty());
        assert!(parse_config(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_loader_keeps_source() {
        let loader = ConfigLoader::new(
            ConfigSource::parse("https://example.com/vanity.yaml"),
            Duration::from_secs(30),
        )
        .unwrap();
        assert!(loader.source().is_remote());
    }
}
