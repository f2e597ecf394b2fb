//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply PUSH_GATEWAY_ORIGIN)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → origin handed to the relay, deep-link target to the click router
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::NotificationConfig;
pub use schema::OriginConfig;
pub use schema::TimeoutConfig;
