//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable CORS for browser clients.
    #[serde(default)]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7667
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            enable_cors: false,
        }
    }
}

impl TransportConfig {
    /// Load transport config from environment variables.
    ///
    /// Reads `BIND_HOST`, `BIND_PORT` and `POOR_HTTP_CORS`. An unparsable
    /// port falls back to the default.
    pub fn from_env() -> Self {
        let port = std::env::var("BIND_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let host = std::env::var("BIND_HOST").unwrap_or_else(|_| default_host());
        let enable_cors = std::env::var("POOR_HTTP_CORS")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        Self {
            port,
            host,
            enable_cors,
        }
    }

    /// The `host:port` pair to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        format!("HTTP on {}", self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::env_guard;

    #[test]
    fn test_from_env() {
        let _guard = env_guard();
        unsafe {
            std::env::set_var("BIND_HOST", "0.0.0.0");
            std::env::set_var("BIND_PORT", "8080");
            std::env::set_var("POOR_HTTP_CORS", "true");
        }
        let config = TransportConfig::from_env();
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert!(config.enable_cors);
        unsafe {
            std::env::remove_var("BIND_HOST");
            std::env::remove_var("BIND_PORT");
            std::env::remove_var("POOR_HTTP_CORS");
        }
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let _guard = env_guard();
        unsafe {
            std::env::set_var("BIND_PORT", "not-a-port");
        }
        let config = TransportConfig::from_env();
        assert_eq!(config.port, 7667);
        assert_eq!(config.description(), "HTTP on 127.0.0.1:7667");
        unsafe {
            std::env::remove_var("BIND_PORT");
        }
    }
}
