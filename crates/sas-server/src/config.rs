use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sas_types::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Public base URL; used in feed links and minted object ids.
    pub base_url: String,
    /// Host part of local account ids (`acct:nick@host`).
    pub host: String,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4815)),
            base_url: "http://localhost:4815".into(),
            host: "localhost".into(),
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl ServerConfig {
    /// Load a TOML config file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn validate(&self) -> ServerResult<()> {
        if self.default_page_size == 0 {
            return Err(ServerError::Config("default_page_size must be positive".into()));
        }
        if self.max_page_size < self.default_page_size {
            return Err(ServerError::Config(format!(
                "max_page_size ({}) is below default_page_size ({})",
                self.max_page_size, self.default_page_size
            )));
        }
        if self.host.trim().is_empty() {
            return Err(ServerError::Config("host must not be blank".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:4815".parse::<SocketAddr>().unwrap());
        assert_eq!(c.default_page_size, 20);
        assert_eq!(c.max_page_size, 200);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let c = ServerConfig::from_toml("bind_addr = \"0.0.0.0:8080\"\nmax_page_size = 50\n").unwrap();
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.max_page_size, 50);
        assert_eq!(c.default_page_size, 20);
    }

    #[test]
    fn toml_roundtrip() {
        let c = ServerConfig::default();
        let parsed = ServerConfig::from_toml(&c.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, c);
    }

    #[test]
    fn inconsistent_page_sizes_rejected() {
        let err = ServerConfig::from_toml("default_page_size = 30\nmax_page_size = 10\n").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ServerConfig::load("/nonexistent/sas.toml").unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
