//! HTTP client and response envelope handling for the TikTok Open API

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::env;
use std::sync::Arc;
use url::Url;

use crate::error::{TikTokError, TikTokResult};

/// Default API host for the TikTok Open API.
pub const DEFAULT_BASE_URL: &str = "https://open-api.tiktok.com";

/// Configuration for the TikTok Open API client.
#[derive(Debug, Clone)]
pub struct TikTokConfig {
    pub client_key: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub base_url: String,
}

impl TikTokConfig {
    /// Build the configuration from environment variables.
    ///
    /// Missing credentials do not fail startup; the health endpoint reports
    /// their absence instead.
    pub fn from_env() -> Self {
        Self {
            client_key: env::var("TIKTOK_CLIENT_KEY").unwrap_or_default(),
            client_secret: env::var("TIKTOK_CLIENT_SECRET").unwrap_or_default(),
            redirect_uri: env::var("TIKTOK_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:3000/auth/callback".to_string()),
            base_url: env::var("TIKTOK_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Whether both API credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.client_key.is_empty() && !self.client_secret.is_empty()
    }
}

/// Client for the TikTok Open API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct TikTokClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: Arc<TikTokConfig>,
}

impl TikTokClient {
    pub fn new(config: TikTokConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &TikTokConfig {
        &self.config
    }

    /// Build an absolute URL for an API path under the configured base URL.
    pub(crate) fn endpoint(&self, path: &str) -> TikTokResult<Url> {
        let base = Url::parse(&self.config.base_url)?;
        Ok(base.join(path)?)
    }
}

/// Response envelope used across the Open API: payload under `data`, with an
/// optional `error` object and top-level `message`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub code: Option<i64>,
    pub message: Option<String>,
}

/// Read a provider response, surfacing non-2xx statuses and error envelopes
/// with their status and message preserved.
pub(crate) async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> TikTokResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(TikTokError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: Envelope<T> = response.json().await?;
    unwrap_envelope(status.as_u16(), envelope)
}

pub(crate) fn unwrap_envelope<T>(status: u16, envelope: Envelope<T>) -> TikTokResult<T> {
    if let Some(error) = envelope.error {
        let message = match (error.code, error.message.or(envelope.message)) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (Some(code), None) => format!("error code {code}"),
            (None, Some(message)) => message,
            (None, None) => "provider reported an unspecified error".to_string(),
        };
        return Err(TikTokError::Api { status, message });
    }

    envelope
        .data
        .ok_or_else(|| TikTokError::InvalidResponse("response carried no data field".to_string()))
}
