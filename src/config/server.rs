//! HTTP listener settings, read from the `server` section
//! (`GYM_HOUSE__SERVER__*`).
//!
//! Every field has a default, so a deployment only has to supply the
//! database and auth sections.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use http::HeaderValue;
use serde::Deserialize;

use super::error::ValidationError;

/// Longest a single request may run before the timeout layer answers 408.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// IP address to listen on. Hostnames are not resolved.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Comma-separated browser origins allowed to call the API. Empty means
    /// no cross-origin access.
    #[serde(default)]
    pub cors_origins: String,
}

/// Deployment flavour. Production switches logging to JSON and tightens the
/// auth checks.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The allowed origins as header values. Each must be an absolute
    /// `http://` or `https://` origin.
    pub fn cors_origins(&self) -> Result<Vec<HeaderValue>, ValidationError> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                let absolute = origin.starts_with("http://") || origin.starts_with("https://");
                match HeaderValue::from_str(origin) {
                    Ok(value) if absolute => Ok(value),
                    _ => Err(ValidationError::InvalidCorsOrigin(origin.to_string())),
                }
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr()?;
        self.cors_origins()?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout_secs(),
            cors_origins: String::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,gym_house=debug,sqlx=warn".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}
