//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tiktok::TikTokError;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or unusable access token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// A provider call failed
    #[error("TikTok API request failed: {0}")]
    Provider(#[from] TikTokError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
            ApiError::Provider(err) => {
                // Provider failures map to 500 with the provider's status and
                // message preserved in the details.
                let details = match &err {
                    TikTokError::Api { status, message } => json!({
                        "status": status,
                        "message": message,
                    }),
                    other => json!(other.to_string()),
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "TikTok API request failed",
                        "details": details,
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
