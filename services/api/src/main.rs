use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{
    HeaderValue, Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod middleware;
mod models;
mod routes;
mod state;

use common::TokenStore;
use tiktok::{TikTokClient, TikTokConfig};

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting TikTok publisher API service");

    let config = AppConfig::from_env();
    let tiktok_config = TikTokConfig::from_env();

    if tiktok_config.is_configured() {
        info!("TikTok API credentials configured");
    } else {
        warn!("TikTok API credentials are not configured; provider calls will fail");
    }

    let app_state = AppState {
        tiktok: TikTokClient::new(tiktok_config),
        tokens: TokenStore::new(),
    };

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true);

    // The default axum body limit is far too small for video uploads; the
    // tower-http layer enforces the configured cap instead.
    let app = routes::create_router(app_state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("API service listening on 0.0.0.0:{}", config.port);
    info!("CORS origin allowed: {}", config.cors_origin);

    axum::serve(listener, app).await?;

    Ok(())
}
