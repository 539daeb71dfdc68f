//! Service configuration loaded from environment variables

use std::env;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 500 * 1024 * 1024;

/// Configuration for the API service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the service listens on
    pub port: u16,
    /// Origin allowed by the CORS layer
    pub cors_origin: String,
    /// Cap on inbound request bodies, sized for video uploads
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .unwrap_or(DEFAULT_PORT);

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            port,
            cors_origin,
            max_upload_bytes,
        }
    }
}
