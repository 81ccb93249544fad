//! Configuration loading and management

use crate::core::error::{ConfigError, PedidosResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// CRM entry point the proxy forwards to unless configured otherwise
pub const DEFAULT_UPSTREAM_URL: &str =
    "http://localhost/AgropecuariaCarangal/index.php?entryPoint=PedidosClientesApi";

/// Address the proxy listens on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    #[validate(length(min = 1, message = "host must not be empty"))]
    pub host: String,

    #[validate(range(min = 1, message = "port must be at least 1"))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// The CRM endpoint every request is forwarded to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Entry-point URL, may already carry a query string
    #[validate(url(message = "upstream url must be a valid URL"))]
    pub url: String,

    /// Request timeout; the HTTP client's default applies when absent
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Cross-origin policy for browser callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allow_any_origin: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_any_origin: true,
        }
    }
}

/// Complete configuration for the proxy server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProxyConfig {
    #[validate(nested)]
    pub server: ServerConfig,

    #[validate(nested)]
    pub upstream: UpstreamConfig,

    pub cors: CorsConfig,
}

impl ProxyConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> PedidosResult<Self> {
        if !Path::new(path).exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> PedidosResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Default configuration: local listener, default CRM entry point
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Override values from `PEDIDOS_HOST`, `PEDIDOS_PORT` and `PEDIDOS_UPSTREAM_URL`
    pub fn apply_env_overrides(&mut self) -> PedidosResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> PedidosResult<()> {
        if let Some(host) = lookup("PEDIDOS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PEDIDOS_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::Invalid {
                message: format!("PEDIDOS_PORT is not a port number: {}", port),
            })?;
        }
        if let Some(url) = lookup("PEDIDOS_UPSTREAM_URL") {
            self.upstream.url = url;
        }
        Ok(())
    }

    /// Check values that deserialization alone cannot enforce
    pub fn validate_config(&self) -> PedidosResult<()> {
        self.validate().map_err(|errors| {
            ConfigError::Invalid {
                message: errors.to_string(),
            }
            .into()
        })
    }

    /// Read the file at `path` (or start from defaults), apply the
    /// environment and validate the result
    pub fn load(path: Option<&str>) -> PedidosResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default_config(),
        };
        config.apply_env_overrides()?;
        config.validate_config()?;
        Ok(config)
    }

    /// Socket address string the server binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ProxyConfig::default_config();
        assert_eq!(config.listen_addr(), "127.0.0.1:3000");
        assert_eq!(config.upstream.url, DEFAULT_UPSTREAM_URL);
        assert!(config.upstream.timeout_secs.is_none());
        assert!(config.cors.allow_any_origin);
        assert!(config.validate_config().is_ok());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ProxyConfig::default_config();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = ProxyConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = ProxyConfig::from_yaml_str("server:\n  port: 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.upstream.url, DEFAULT_UPSTREAM_URL);
    }

    #[test]
    fn test_invalid_upstream_url_is_rejected() {
        let config =
            ProxyConfig::from_yaml_str("upstream:\n  url: \"not a url\"\n").unwrap();
        let err = config.validate_config().unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_overrides_replace_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PEDIDOS_HOST", "0.0.0.0"),
            ("PEDIDOS_PORT", "8088"),
            ("PEDIDOS_UPSTREAM_URL", "http://crm.local/index.php?entryPoint=X"),
        ]);
        let mut config = ProxyConfig::default_config();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.listen_addr(), "0.0.0.0:8088");
        assert_eq!(config.upstream.url, "http://crm.local/index.php?entryPoint=X");
    }

    #[test]
    fn test_bad_port_override_is_rejected() {
        let mut config = ProxyConfig::default_config();
        let result = config.apply_overrides(|key| {
            (key == "PEDIDOS_PORT").then(|| "tres mil".to_string())
        });
        assert!(result.is_err());
    }
}
