//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request (any method, any path)
//!     → server.rs (Axum setup, CORS, request ID, tracing)
//!     → relay.rs (destination URL, JSON body framing, bounded origin call)
//!     → response.rs (origin status + JSON body, or 500 error envelope)
//!     → Send to client
//! ```

pub mod relay;
pub mod request;
pub mod response;
pub mod server;

pub use relay::Relay;
pub use request::X_REQUEST_ID;
pub use response::{ErrorEnvelope, RelayError, RelayedResponse};
pub use server::HttpServer;
