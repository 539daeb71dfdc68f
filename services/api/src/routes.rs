//! Proxy routes over the TikTok Open API

use axum::{
    Extension, Json, Router,
    extract::{Multipart, Path, State, rejection::JsonRejection},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use common::StoredToken;
use tiktok::{PrivacyLevel, VideoUpload};

use crate::{
    error::{ApiError, ApiResult},
    middleware::{BearerToken, require_bearer},
    models::{
        AuthUrlResponse, ExchangeCodeRequest, PublishVideoResponse, TokenGrantResponse,
        VideoListResponse,
    },
    state::AppState,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let bearer_routes = Router::new()
        .route("/api/user/info", get(user_info))
        .route("/api/publish/status/:video_id", get(publish_status))
        .route("/api/videos", get(list_videos))
        .route_layer(middleware::from_fn(require_bearer));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/auth/tiktok/url", get(auth_url))
        .route("/api/auth/tiktok", post(exchange_code))
        .route("/api/publish/video", post(publish_video))
        .merge(bearer_routes)
        .with_state(state)
}

/// Health check endpoint, also reporting credential presence
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
        "tiktok_configured": state.tiktok.config().is_configured(),
    }))
}

/// Generate the provider authorization URL the client redirects the user to
pub async fn auth_url(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    // Fresh nonce per request, echoed back on the OAuth callback.
    let nonce = Uuid::new_v4().simple().to_string();

    let auth_url = state.tiktok.authorize_url(&nonce).map_err(|e| {
        error!("Failed to build authorization URL: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(AuthUrlResponse { auth_url }))
}

/// Exchange an authorization code for an access token
pub async fn exchange_code(
    State(state): State<AppState>,
    payload: Result<Json<ExchangeCodeRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    // Malformed bodies get the same JSON error shape as every other failure.
    let Json(payload) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let code = payload
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Authorization code is required".to_string()))?;

    let grant = state.tiktok.exchange_code(&code).await.map_err(|e| {
        error!("Token exchange failed: {}", e);
        ApiError::Provider(e)
    })?;

    state
        .tokens
        .insert(
            grant.access_token.clone(),
            StoredToken::new(grant.refresh_token, grant.expires_in, grant.scope.clone()),
        )
        .await;

    info!("Access token granted and recorded");

    Ok(Json(TokenGrantResponse {
        access_token: grant.access_token,
        expires_in: grant.expires_in,
        scope: grant.scope,
    }))
}

/// Fetch the profile of the user the bearer token belongs to
pub async fn user_info(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> ApiResult<impl IntoResponse> {
    let user = state.tiktok.user_info(&token).await.map_err(|e| {
        error!("Failed to fetch user info: {}", e);
        ApiError::Provider(e)
    })?;

    Ok(Json(user))
}

/// Upload a video to the provider's content posting endpoint
pub async fn publish_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let mut video: Option<(String, String, Vec<u8>)> = None;
    let mut description = String::new();
    let mut privacy_level = PrivacyLevel::default();
    let mut access_token: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "video" => {
                let file_name = field.file_name().unwrap_or("video.mp4").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read video field: {e}")))?;
                video = Some((file_name, content_type, data.to_vec()));
            }
            "description" => {
                description = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read description field: {e}"))
                })?;
            }
            "privacy_level" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read privacy_level field: {e}"))
                })?;
                privacy_level = value.parse().map_err(ApiError::BadRequest)?;
            }
            "access_token" => {
                access_token = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read access_token field: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) =
        video.ok_or_else(|| ApiError::BadRequest("Video file is required".to_string()))?;

    let access_token = access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Access token required".to_string()))?;

    if !state.tokens.contains(&access_token).await {
        return Err(ApiError::Unauthorized("Invalid access token".to_string()));
    }

    let upload = VideoUpload {
        file_name,
        content_type,
        data,
        description,
        privacy_level,
    };
    upload.validate().map_err(ApiError::BadRequest)?;

    let video_id = state
        .tiktok
        .upload_video(&access_token, upload)
        .await
        .map_err(|e| {
            error!("Video upload failed: {}", e);
            ApiError::Provider(e)
        })?;

    Ok(Json(PublishVideoResponse {
        success: true,
        video_id,
        message: "Video uploaded successfully".to_string(),
    }))
}

/// Fetch the publish status of an uploaded video, passed through verbatim
pub async fn publish_status(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> ApiResult<impl IntoResponse> {
    let status = state
        .tiktok
        .publish_status(&token, &video_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch publish status: {}", e);
            ApiError::Provider(e)
        })?;

    Ok(Json(status))
}

/// List the authorized user's videos
pub async fn list_videos(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> ApiResult<impl IntoResponse> {
    let videos = state.tiktok.list_videos(&token).await.map_err(|e| {
        error!("Failed to fetch video list: {}", e);
        ApiError::Provider(e)
    })?;

    Ok(Json(VideoListResponse { videos }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use common::TokenStore;
    use tiktok::{TikTokClient, TikTokConfig};
    use tower::ServiceExt;

    const BOUNDARY: &str = "test-boundary";

    fn test_state() -> AppState {
        AppState {
            tiktok: TikTokClient::new(TikTokConfig {
                client_key: "test-key".to_string(),
                client_secret: "test-secret".to_string(),
                redirect_uri: "http://localhost:3000/auth/callback".to_string(),
                base_url: "https://open-api.tiktok.com".to_string(),
            }),
            tokens: TokenStore::new(),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn video_part(data: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"video\"; filename=\"clip.mp4\"\r\nContent-Type: video/mp4\r\n\r\n{data}\r\n"
        )
    }

    fn multipart_request(parts: &[String]) -> Request<Body> {
        let mut body = parts.concat();
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri("/api/publish/video")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "OK");
        assert_eq!(body["tiktok_configured"], true);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_auth_url_carries_client_key_and_scopes() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/tiktok/url")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let auth_url = body["authUrl"].as_str().unwrap();
        assert!(auth_url.starts_with("https://open-api.tiktok.com/oauth/authorize/"));
        assert!(auth_url.contains("client_key=test-key"));
        assert!(auth_url.contains("response_type=code"));
        assert!(auth_url.contains("state="));
    }

    #[tokio::test]
    async fn test_exchange_without_code_is_bad_request() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/tiktok")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Authorization code is required");
    }

    #[tokio::test]
    async fn test_exchange_with_empty_code_is_bad_request() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/tiktok")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"code": ""}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_exchange_with_malformed_json_answers_json_error() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/tiktok")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("application/json"));

        let body = body_json(response).await;
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("Failed to parse the request body as JSON")
        );
    }

    #[tokio::test]
    async fn test_user_info_without_bearer_is_unauthorized() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/user/info")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Access token required");
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_is_unauthorized() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/videos")
                    .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_publish_status_without_bearer_is_unauthorized() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/publish/status/v123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_upload_without_video_is_bad_request() {
        let app = create_router(test_state());

        let request = multipart_request(&[text_part("description", "no file attached")]);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Video file is required");
    }

    #[tokio::test]
    async fn test_upload_without_token_is_unauthorized() {
        let app = create_router(test_state());

        let request = multipart_request(&[video_part("fake bytes")]);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Access token required");
    }

    #[tokio::test]
    async fn test_upload_with_unknown_token_is_unauthorized() {
        let app = create_router(test_state());

        let request = multipart_request(&[
            video_part("fake bytes"),
            text_part("access_token", "not-in-store"),
        ]);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid access token");
    }

    #[tokio::test]
    async fn test_upload_with_unknown_privacy_level_is_bad_request() {
        let app = create_router(test_state());

        let request = multipart_request(&[
            video_part("fake bytes"),
            text_part("privacy_level", "FRIENDS"),
            text_part("access_token", "not-in-store"),
        ]);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Unknown privacy level: FRIENDS");
    }

    #[tokio::test]
    async fn test_upload_with_oversized_description_is_bad_request() {
        let state = test_state();
        state
            .tokens
            .insert("stored-token", StoredToken::new("refresh", 3600, "video.publish"))
            .await;
        let app = create_router(state);

        let request = multipart_request(&[
            video_part("fake bytes"),
            text_part("description", &"x".repeat(2201)),
            text_part("access_token", "stored-token"),
        ]);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
