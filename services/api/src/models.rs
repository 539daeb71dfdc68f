//! Request and response payloads for the proxy surface

use serde::{Deserialize, Serialize};

/// Response for the authorization URL endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthUrlResponse {
    #[serde(rename = "authUrl")]
    pub auth_url: String,
}

/// Request body for the code exchange endpoint.
#[derive(Debug, Deserialize)]
pub struct ExchangeCodeRequest {
    #[serde(default)]
    pub code: Option<String>,
}

/// Response for a successful code exchange.
#[derive(Debug, Serialize)]
pub struct TokenGrantResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub scope: String,
}

/// Response for a successful video upload.
#[derive(Debug, Serialize)]
pub struct PublishVideoResponse {
    pub success: bool,
    pub video_id: String,
    pub message: String,
}

/// Response wrapping the authorized user's video list.
#[derive(Debug, Serialize)]
pub struct VideoListResponse {
    pub videos: Vec<serde_json::Value>,
}
