//! Application state shared across handlers

use common::TokenStore;
use tiktok::TikTokClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub tiktok: TikTokClient,
    pub tokens: TokenStore,
}
