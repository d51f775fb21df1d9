//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! vanity document (YAML, disk or http(s))
//!     → source.rs (fetch raw bytes)
//!     → loader.rs (decode)
//!     → validation.rs (semantic checks, GitHub display synthesis)
//!     → VanityMap (validated, immutable)
//!     → store.rs (atomic swap, shared with request handlers)
//!
//! On reload trigger (interval, SIGHUP, file change):
//!     lifecycle::refresh runs the same pipeline
//!     → store.replace(new map) on success
//!     → previous map kept on any error
//! ```
//!
//! # Design Decisions
//! - A mapping is immutable once loaded; changes require full reload
//! - Entry fields default when omitted; validation rejects useless entries
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod source;
pub mod store;
pub mod validation;
pub mod watcher;

pub use loader::{parse_config, ConfigError, ConfigLoader};
pub use schema::{RepositoryEntry, ServerConfig, VanityMap};
pub use source::ConfigSource;
pub use store::ConfigStore;
pub use validation::ValidationError;
