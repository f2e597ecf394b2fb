//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `origin.base_url`.
pub const ORIGIN_ENV: &str = "PUSH_GATEWAY_ORIGIN";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content, std::env::var(ORIGIN_ENV).ok())
}

/// Resolve configuration without a file: defaults plus environment override.
pub fn default_config() -> Result<GatewayConfig, ConfigError> {
    parse_config("", std::env::var(ORIGIN_ENV).ok())
}

/// Parse TOML, apply the origin override, then validate.
pub fn parse_config(
    content: &str,
    origin_override: Option<String>,
) -> Result<GatewayConfig, ConfigError> {
    let mut config: GatewayConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    if let Some(origin) = origin_override.filter(|o| !o.is_empty()) {
        tracing::debug!(origin = %origin, "Origin overridden from environment");
        config.origin.base_url = origin;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_override_replaces_file_origin() {
        let config = parse_config(
            "[origin]\nbase_url = \"http://10.0.0.1:5000\"\n",
            Some("http://10.0.0.2:6000".into()),
        )
        .unwrap();
        assert_eq!(config.origin.base_url, "http://10.0.0.2:6000");
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let err = parse_config("", Some("not a url".into())).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().starts_with("Validation failed: invalid origin url"));
    }

    #[test]
    fn test_parse_error_reported() {
        let err = parse_config("[origin\n", None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("push-gateway-{}.toml", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[listener]\nbind_address = \"127.0.0.1:9999\"").unwrap();
        drop(file);

        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_example_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("gateway.example.toml");
        let config = load_config(&path).unwrap();
        assert_eq!(
            config.notifications.deep_link_target().unwrap().as_str(),
            "https://app.example.com/notifications"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
