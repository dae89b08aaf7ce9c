//! Server configuration.

use axum::http::{HeaderValue, Method, header};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};

/// Origin value that allows every origin
pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),
}

/// Runtime configuration of the server process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,
    /// Port number to bind to (e.g., 4000)
    pub port: u16,
    /// Allowed CORS origin, `*` for any
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            cors_origin: ANY_ORIGIN.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// CORS policy applied to every HTTP response.
    ///
    /// Credentials are only allowed for an explicit origin; browsers reject
    /// credentialed responses carrying a wildcard origin.
    pub fn cors_layer(&self) -> Result<CorsLayer, ConfigError> {
        let layer = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        if self.cors_origin == ANY_ORIGIN {
            return Ok(layer.allow_origin(Any));
        }

        let origin = HeaderValue::from_str(&self.cors_origin)
            .map_err(|_| ConfigError::InvalidCorsOrigin(self.cors_origin.clone()))?;
        Ok(layer.allow_origin(origin).allow_credentials(true))
    }
}
