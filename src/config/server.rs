//! HTTP listener, logging and CORS settings.

use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

/// Longest request timeout accepted; gateway calls finish well within it.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Every field has a default, so the whole section may be omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub log_level: String,

    /// Bounds each request, including the gateway calls it makes.
    pub request_timeout_secs: u64,

    /// Comma-separated allowed origins. Unset allows any origin.
    pub cors_origins: Option<String>,
}

/// Deployment environment. Production switches logs to JSON and tightens
/// validation of secrets and email delivery.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            environment: Environment::Development,
            log_level: "info,peche_checkout=debug,sqlx=warn,tower_http=info".to_string(),
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidListenAddress(addr))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured origins, trimmed, blanks dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}
