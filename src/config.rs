use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_MESSAGE_PATH: &str = "/message";

/// Server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Path clients POST session messages to. `MESSAGE_ENDPOINT` may be a
    /// full URL, in which case only its path component is kept.
    pub message_path: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = match var("HOST") {
            Some(raw) => raw.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: "HOST",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_HOST,
        };

        let port = match var("PORT") {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: "PORT",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_PORT,
        };

        let message_path = var("MESSAGE_ENDPOINT")
            .map(|raw| normalize_message_path(&raw))
            .unwrap_or_else(|| DEFAULT_MESSAGE_PATH.to_string());

        Ok(Self {
            host,
            port,
            message_path,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Reduce a `MESSAGE_ENDPOINT` value to a route path: a full URL keeps only
/// its path, a bare path is used as-is (with a leading slash enforced).
fn normalize_message_path(raw: &str) -> String {
    let path = match Url::parse(raw) {
        Ok(url) if !url.path().is_empty() => url.path().to_string(),
        _ => raw.to_string(),
    };
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}
