//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Deployment environment name (development, production, test)
    pub environment: String,
}

impl ServiceConfig {
    /// Full `host:port` bind address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
        }
    }
}

/// Cross-origin resource sharing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origin, or `*` for any
    pub origin: String,
}

impl CorsConfig {
    /// Whether any origin is allowed.
    pub fn allows_any(&self) -> bool {
        self.origin == "*"
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origin: "*".to_string(),
        }
    }
}
