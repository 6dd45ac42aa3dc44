//! Configuration types.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::assistant::SystemStatus;
use crate::error::ConfigError;

/// Interface version reported by the status endpoint.
pub const INTERFACE_VERSION: &str = "2.3.7";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3001;

/// Status fields the assistant service is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    /// Whether the system reports itself as active.
    pub active: bool,
    /// Version string of the assistant interface.
    pub interface_version: String,
    /// Reported liveness.
    pub status: SystemStatus,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            active: true,
            interface_version: INTERFACE_VERSION.to_string(),
            status: SystemStatus::Online,
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind_addr: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Directory for rolling log files (stderr only when unset).
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: format!("{raw:?}: {e}"),
            })?,
            None => defaults.port,
        };

        let bind_addr = match get("SPECTRO_BIND_ADDR") {
            Some(raw) => raw.parse::<IpAddr>().map_err(|e| ConfigError::InvalidValue {
                key: "SPECTRO_BIND_ADDR".to_string(),
                message: format!("{raw:?}: {e}"),
            })?,
            None => defaults.bind_addr,
        };

        let log_dir = get("SPECTRO_LOG_DIR").map(PathBuf::from);

        Ok(Self {
            bind_addr,
            port,
            log_dir,
        })
    }

    /// Socket address the server listens on.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}
