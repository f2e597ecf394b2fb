//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs for the origin and the app deep-link target
//! - Validate value ranges (timeouts > 0, body limit > 0, bind address)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid origin url '{url}': {reason}")]
    OriginUrl { url: String, reason: String },

    #[error("invalid app origin '{url}': {reason}")]
    AppOrigin { url: String, reason: String },

    #[error("deep link path '{0}' must start with '/'")]
    DeepLinkPath(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Err(reason) = check_origin(&config.origin.base_url) {
        errors.push(ValidationError::OriginUrl {
            url: config.origin.base_url.clone(),
            reason,
        });
    }

    if let Err(e) = url::Url::parse(&config.notifications.app_origin) {
        errors.push(ValidationError::AppOrigin {
            url: config.notifications.app_origin.clone(),
            reason: e.to_string(),
        });
    }

    if !config.notifications.deep_link_path.starts_with('/') {
        errors.push(ValidationError::DeepLinkPath(
            config.notifications.deep_link_path.clone(),
        ));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.connect_secs"));
    }
    if config.timeouts.origin_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.origin_secs"));
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("limits.max_body_bytes"));
    }
    if config.limits.max_response_bytes == 0 {
        errors.push(ValidationError::Zero("limits.max_response_bytes"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The origin must be a plain http base: paths are appended to it, so a
/// query or fragment would corrupt every destination URL.
pub fn check_origin(base_url: &str) -> Result<(), String> {
    let url = url::Url::parse(base_url).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("query and fragment are not allowed".to_string());
    }
    Ok(())
}
