use config::{Config, Environment};
use serde::Deserialize;
use std::net::SocketAddr;

use crate::error::Result;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the `MOODMATE_` prefix.
/// For example: `MOODMATE_SERVER__PORT=8000`, `MOODMATE_DEFAULTS__REGION=UK`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Cross-origin settings
    #[serde(default)]
    pub cors: CorsConfig,

    /// Request limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Request defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes (base64 images included)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Region used when a request omits one
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
        }
    }
}

fn default_region() -> String {
    crate::catalog::DEFAULT_REGION.to_string()
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables should be prefixed with `MOODMATE` and use
    /// double underscores for nested values:
    /// - `MOODMATE_SERVER__HOST` -> server.host
    /// - `MOODMATE_SERVER__PORT` -> server.port
    /// - `MOODMATE_CORS__ALLOWED_ORIGINS` -> cors.allowed_origins (comma separated)
    /// - `MOODMATE_LIMITS__MAX_BODY_BYTES` -> limits.max_body_bytes
    pub fn load() -> Result<Self> {
        Self::from_environment(environment())
    }

    fn from_environment(source: Environment) -> Result<Self> {
        let config = Config::builder().add_source(source).build()?;
        Ok(config.try_deserialize()?)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("MOODMATE")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn env_source(vars: &[(&str, &str)]) -> Environment {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(vars))
    }

    #[test]
    fn test_environment_overrides() {
        let config = AppConfig::from_environment(env_source(&[
            ("MOODMATE_SERVER__PORT", "9000"),
            ("MOODMATE_CORS__ALLOWED_ORIGINS", "http://a.test,http://b.test"),
            ("MOODMATE_DEFAULTS__REGION", "UK"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(config.defaults.region, "UK");
    }

    #[test]
    fn test_invalid_environment_is_config_error() {
        let err =
            AppConfig::from_environment(env_source(&[("MOODMATE_SERVER__PORT", "not-a-port")]))
                .unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.cors.allowed_origins, vec!["*".to_string()]);
        assert!(config.cors.allows_any_origin());
        assert_eq!(config.limits.max_body_bytes, 10 * 1024 * 1024);
        assert_eq!(config.defaults.region, "Global");
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig::default();
        let addr = server.socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_invalid_socket_addr() {
        let server = ServerConfig {
            host: "not a host".to_string(),
            port: 1,
        };
        assert!(server.socket_addr().is_err());
    }

    #[test]
    fn test_explicit_origins() {
        let cors = CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        };
        assert!(!cors.allows_any_origin());
    }
}
