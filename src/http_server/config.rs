//! HTTP listener settings
//!
//! Bind address and the browser origins allowed to call the API.

use std::io;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS. Empty means any origin, which suits a
    /// dashboard served from a separate dev server.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// `host:port` as configured
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse the listen address
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        self.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid listen address {}: {}", self.socket_addr(), e),
            )
        })
    }

    /// CORS policy for the dashboard API. Origins that fail to parse as
    /// header values are skipped with a warning.
    pub fn cors_layer(&self) -> CorsLayer {
        let origin = if self.cors_origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            let origins: Vec<_> = self
                .cors_origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(%origin, "ignoring unparseable CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
