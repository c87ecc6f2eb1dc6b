//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Wire bus + pipeline → Start web listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, consumers next, listener last
//! - Shutdown closes the web listener; in-flight requests drain

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
