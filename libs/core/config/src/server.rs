use crate::ConfigError;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromStr for ServerConfig {
    type Err = ConfigError;

    /// Parses a listen address of the form `host:port`.
    ///
    /// An empty host (`":8080"`) binds every interface.
    fn from_str(address: &str) -> Result<Self, Self::Err> {
        let (host, port) = address
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| ConfigError::ParseError {
                key: "hostname".to_string(),
                details: format!("expected host:port, got '{}'", address),
            })?;

        let port = port.parse().map_err(|e| ConfigError::ParseError {
            key: "hostname".to_string(),
            details: format!("{}", e),
        })?;

        let host = if host.is_empty() {
            Ipv4Addr::UNSPECIFIED.to_string()
        } else {
            host.to_string()
        };

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_from_address() {
        let config: ServerConfig = "127.0.0.1:3000".parse().unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_server_config_empty_host_binds_all() {
        let config: ServerConfig = ":9000".parse().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_server_config_invalid_port() {
        let err = "localhost:not_a_number".parse::<ServerConfig>().unwrap_err();
        assert!(err.to_string().contains("hostname"));
    }

    #[test]
    fn test_server_config_port_out_of_range() {
        assert!("localhost:99999".parse::<ServerConfig>().is_err());
    }

    #[test]
    fn test_server_config_missing_port() {
        assert!("localhost".parse::<ServerConfig>().is_err());
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, Ipv4Addr::UNSPECIFIED.to_string());
        assert_eq!(config.port, 8080);
    }
}
