//! Vanity import path server.
//!
//! Serves `go-import`/`go-source` pages for custom import paths from a YAML
//! mapping that is reloaded periodically, on SIGHUP, and optionally on file
//! change.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{ConfigStore, ServerConfig};
pub use http::HttpServer;
pub use lifecycle::{Shutdown, VanityApp};
