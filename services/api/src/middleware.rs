//! Bearer token extraction for provider-authenticated routes

use axum::{
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;

/// The raw provider access token taken from the Authorization header.
///
/// The token is opaque to this service; it is forwarded to TikTok, which is
/// the authority on its validity.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Middleware requiring a `Authorization: Bearer <token>` header.
///
/// The extracted token is inserted into the request extensions; missing or
/// malformed headers are rejected before any outbound call is made.
pub async fn require_bearer(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))?;

    let token = BearerToken(token.to_string());
    req.extensions_mut().insert(token);

    Ok(next.run(req).await)
}
