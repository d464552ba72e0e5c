//! Server configuration.

use crate::usecase::UploadPolicy;

/// Runtime configuration of the relay server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to (e.g., "127.0.0.1")
    pub host: String,
    /// Port number to bind to; `0` asks the OS for a free port
    pub port: u16,
    pub upload: UploadPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            upload: UploadPolicy::default(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.upload.max_bytes, 48 * 1024 * 1024);
        assert!(config.upload.allowed_extensions.contains(&"pdf".to_string()));
    }
}
