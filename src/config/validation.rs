//! Configuration validation and enrichment.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject entries that could never be served (no repo, unroutable key)
//! - Fill in `go-source` display templates for GitHub repositories
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: &VanityMap → Result<(), Vec<ValidationError>>
//! - Runs before a document is accepted into the store

use thiserror::Error;

use crate::config::schema::{RepositoryEntry, VanityMap};

/// A single semantic problem in a vanity document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("entry {path:?} has no repo")]
    MissingRepo { path: String },

    #[error("entry {path:?} must start with '/'")]
    InvalidPath { path: String },
}

/// Check every entry of the document.
pub fn validate_map(map: &VanityMap) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (path, entry) in map {
        if !path.starts_with('/') {
            errors.push(ValidationError::InvalidPath { path: path.clone() });
        }
        if entry.repo.trim().is_empty() {
            errors.push(ValidationError::MissingRepo { path: path.clone() });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Synthesize display templates for GitHub entries that lack one.
pub fn enrich_map(map: &mut VanityMap) {
    for entry in map.values_mut() {
        enrich_entry(entry);
    }
}

fn enrich_entry(entry: &mut RepositoryEntry) {
    if !entry.display.is_empty() {
        return;
    }
    if entry.repo.contains("github.com") {
        entry.display = github_display(&entry.repo);
    }
}

/// `go-source` templates for a GitHub repository: home, directory and file.
pub fn github_display(repo: &str) -> String {
    format!("{repo} {repo}/tree/master{{/dir}} {repo}/blob/master{{/dir}}/{{file}}#L{{line}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(entries: &[(&str, RepositoryEntry)]) -> VanityMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_github_display_format() {
        assert_eq!(
            github_display("https://github.com/org/foo"),
            "https://github.com/org/foo https://github.com/org/foo/tree/master{/dir} https://github.com/org/foo/blob/master{/dir}/{file}#L{line}"
        );
    }

    #[test]
    fn test_enrich_only_touches_empty_github_entries() {
        let mut map = map_of(&[
            ("/gh", RepositoryEntry::new("https://github.com/org/gh")),
            (
                "/custom",
                RepositoryEntry::new("https://github.com/org/custom").with_display("keep me"),
            ),
            ("/other", RepositoryEntry::new("https://gitlab.com/org/other")),
        ]);

        enrich_map(&mut map);

        assert_eq!(map["/gh"].display, github_display("https://github.com/org/gh"));
        assert_eq!(map["/custom"].display, "keep me");
        assert!(map["/other"].display.is_empty());
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let map = map_of(&[
            ("/ok", RepositoryEntry::new("https://github.com/org/ok")),
            ("/norepo", RepositoryEntry::default()),
            ("bad", RepositoryEntry::new("https://github.com/org/bad")),
        ]);

        let errors = validate_map(&map).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::MissingRepo { path: "/norepo".into() }));
        assert!(errors.contains(&ValidationError::InvalidPath { path: "bad".into() }));
    }

    #[test]
    fn test_validation_accepts_empty_map() {
        assert!(validate_map(&VanityMap::new()).is_ok());
    }
}
