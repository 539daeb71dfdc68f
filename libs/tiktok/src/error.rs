//! Error types for the TikTok Open API client

use thiserror::Error;

/// Errors produced while talking to the TikTok Open API.
#[derive(Error, Debug)]
pub enum TikTokError {
    /// The outbound request itself failed (connect, timeout, body decode).
    #[error("request to TikTok failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status or an error envelope.
    #[error("TikTok API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The provider answered 2xx but the body did not match the expected shape.
    #[error("unexpected TikTok response: {0}")]
    InvalidResponse(String),

    /// A request URL could not be built from the configured base URL.
    #[error("invalid TikTok API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Type alias for client results
pub type TikTokResult<T> = Result<T, TikTokError>;
