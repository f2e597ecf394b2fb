//! Push gateway library: JSON request relay plus background notification handlers.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod notification;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
