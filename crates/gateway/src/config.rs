//! Gateway configuration.

use std::env;

use common::{CorsConfig, ServiceConfig};

/// Default port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address and environment
    pub service: ServiceConfig,
    /// Allowed cross-origin callers
    pub cors: CorsConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                host: env::var("HOST").unwrap_or(defaults.service.host),
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.service.port),
                environment: env::var("APP_ENV").unwrap_or(defaults.service.environment),
            },
            cors: CorsConfig {
                origin: env::var("CORS_ORIGIN").unwrap_or(defaults.cors.origin),
            },
        }
    }

    /// Override the bind address (CLI flags take precedence over env).
    pub fn with_addr(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.service.host = host;
        }
        if let Some(port) = port {
            self.service.port = port;
        }
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-api".to_string(),
                port: DEFAULT_PORT,
                ..ServiceConfig::default()
            },
            cors: CorsConfig::default(),
        }
    }
}
