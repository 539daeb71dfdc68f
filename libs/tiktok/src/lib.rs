//! Client for the TikTok Open API
//!
//! Covers the pieces of `open-api.tiktok.com` the backend brokers: OAuth
//! authorization URL construction and code exchange, user info, video upload
//! through the content posting endpoint, publish status, and the authorized
//! user's video list.

mod client;
pub mod error;
pub mod oauth;
pub mod publish;
pub mod user;

pub use client::{DEFAULT_BASE_URL, TikTokClient, TikTokConfig};
pub use error::TikTokError;
pub use oauth::AccessTokenGrant;
pub use publish::{MAX_DESCRIPTION_CHARS, PrivacyLevel, VideoUpload};
pub use user::UserInfo;
