//! Host configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the development host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
    /// Whether to serve `/_health`.
    pub enable_health: bool,
    /// Whether to serve `/_functions`.
    pub enable_functions_listing: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_size: 10 * 1024 * 1024, // 10MB
            enable_health: true,
            enable_functions_listing: true,
        }
    }
}

impl HostConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the body size cap.
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = HostConfig::new().host("127.0.0.1").port(9000).max_body_size(16);
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.max_body_size, 16);
        assert!(config.enable_health);
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: HostConfig = serde_json::from_str(r#"{"port": 3000}"#).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
    }
}
