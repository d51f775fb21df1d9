//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Build loader/store → Install SIGHUP → Initial load → Spawn refresh → Serve
//!
//! Refresh (refresh.rs):
//!     every interval ─┐
//!     SIGHUP ─────────┼→ Reloader::reload → ConfigStore::replace
//!     file change ────┘
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → broadcast → server and refresh loops exit
//! ```
//!
//! # Design Decisions
//! - Reload failures never stop the process
//! - SIGHUP triggers config reload, not shutdown
//! - No drain on shutdown; process exit tears everything down

pub mod refresh;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use refresh::{RefreshScheduler, ReloadTrigger, Reloader};
pub use shutdown::Shutdown;
pub use startup::{StartupError, VanityApp};
