use std::net::SocketAddr;
use thiserror::Error;

/// Environment variable overriding the listen address
pub const ADDR_ENV: &str = "CHECKERS_ADDR";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid listen address {value:?}: {source}")]
    InvalidAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Read the configuration from the environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(ADDR_ENV) {
            Ok(value) => Self::with_addr(&value),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn with_addr(value: &str) -> Result<Self, ConfigError> {
        let addr = value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidAddr {
                value: value.to_string(),
                source,
            })?;
        Ok(ServerConfig { addr })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}
