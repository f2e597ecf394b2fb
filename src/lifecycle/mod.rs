//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! signals.rs: SIGTERM/SIGINT
//!     → shutdown.rs: broadcast to subscribers
//!     → HTTP server stops accepting and drains in-flight relays
//!     → notification worker (when a host runs one) finishes queued events
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
