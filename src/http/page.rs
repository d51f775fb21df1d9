//! Vanity page rendering.
//!
//! The page carries the `go-import` and `go-source` meta tags read by the
//! go tool and documentation sites, and redirects browsers to the package
//! documentation.

use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use maud::{html, Markup, DOCTYPE};
use thiserror::Error;

use crate::config::RepositoryEntry;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to build response: {0}")]
    Response(#[from] axum::http::Error),
}

/// Values interpolated into the page.
#[derive(Debug, Clone)]
pub struct VanityPage<'a> {
    /// `host + request path`, e.g. `example.com/foo`.
    pub import_path: String,
    pub repo: &'a str,
    pub display: &'a str,
    pub doc_url: &'a str,
}

impl<'a> VanityPage<'a> {
    pub fn new(host: &str, path: &str, entry: &'a RepositoryEntry, doc_url: &'a str) -> Self {
        Self {
            import_path: format!("{host}{path}"),
            repo: &entry.repo,
            display: &entry.display,
            doc_url: doc_url.trim_end_matches('/'),
        }
    }

    fn doc_link(&self) -> String {
        format!("{}/{}", self.doc_url, self.import_path)
    }

    pub fn markup(&self) -> Markup {
        let go_import = format!("{} git {}", self.import_path, self.repo);
        let go_source = format!("{} {}", self.import_path, self.display);
        let doc_link = self.doc_link();
        let refresh = format!("0; url={doc_link}");

        html! {
            (DOCTYPE)
            html {
                head {
                    meta http-equiv="Content-Type" content="text/html; charset=utf-8";
                    meta name="go-import" content=(go_import);
                    meta name="go-source" content=(go_source);
                    meta http-equiv="refresh" content=(refresh);
                }
                body {
                    "Nothing to see here; "
                    a href=(doc_link) { "see the package on godoc" }
                    "."
                }
            }
        }
    }

    /// Render into a complete `200 OK` HTML response.
    pub fn into_response(self) -> Result<Response<Body>, RenderError> {
        let body = self.markup().into_string();
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, HTML_CONTENT_TYPE)
            .body(Body::from(body))?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_contains_meta_tags() {
        let entry = RepositoryEntry::new("https://github.com/org/foo").with_display("D");
        let page = VanityPage::new("example.com", "/foo", &entry, "https://godoc.org/");
        let html = page.markup().into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<meta name="go-import" content="example.com/foo git https://github.com/org/foo">"#));
        assert!(html.contains(r#"<meta name="go-source" content="example.com/foo D">"#));
        assert!(html.contains(r#"content="0; url=https://godoc.org/example.com/foo""#));
        assert!(html.contains(r#"<a href="https://godoc.org/example.com/foo">"#));
    }

    #[test]
    fn test_interpolated_values_are_escaped() {
        let entry = RepositoryEntry::new(r#"https://evil.example/"><script>"#);
        let page = VanityPage::new("example.com", "/x", &entry, "https://godoc.org");
        let html = page.markup().into_string();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_empty_display_still_renders() {
        let entry = RepositoryEntry::new("https://git.example.com/bar");
        let page = VanityPage::new("example.com", "/bar", &entry, "https://godoc.org");
        let html = page.markup().into_string();
        assert!(html.contains(r#"<meta name="go-source" content="example.com/bar ">"#));
    }

    #[test]
    fn test_response_is_html() {
        let entry = RepositoryEntry::new("https://github.com/org/foo");
        let response = VanityPage::new("example.com", "/foo", &entry, "https://godoc.org")
            .into_response()
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], HTML_CONTENT_TYPE);
    }
}
