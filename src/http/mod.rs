//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request id, tracing, timeout)
//!     → vanity handler: ConfigStore::lookup(path)
//!         miss → 404
//!         hit  → page.rs (render go-import/go-source page) → 200
//!                render failure → 500
//! ```

pub mod page;
pub mod request;
pub mod server;

pub use page::{RenderError, VanityPage};
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
