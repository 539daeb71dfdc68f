//! OAuth authorization flow against the TikTok Open API

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::{TikTokClient, read_envelope};
use crate::error::TikTokResult;

/// Scopes requested during authorization.
pub const OAUTH_SCOPES: &str = "user.info.basic,video.publish";

/// Body of the code-for-token exchange request.
#[derive(Serialize)]
struct AccessTokenRequest<'a> {
    client_key: &'a str,
    client_secret: &'a str,
    code: &'a str,
    grant_type: &'a str,
    redirect_uri: &'a str,
}

/// A granted access token, as returned by the provider's token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub scope: String,
    #[serde(default)]
    pub open_id: Option<String>,
}

impl TikTokClient {
    /// Build the authorization URL the user is redirected to.
    ///
    /// `state` is an opaque nonce echoed back on the callback.
    pub fn authorize_url(&self, state: &str) -> TikTokResult<String> {
        let mut url = self.endpoint("/oauth/authorize/")?;
        url.query_pairs_mut()
            .append_pair("client_key", &self.config.client_key)
            .append_pair("scope", OAUTH_SCOPES)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("state", state);

        Ok(url.into())
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> TikTokResult<AccessTokenGrant> {
        info!("Exchanging authorization code for access token");

        let request = AccessTokenRequest {
            client_key: &self.config.client_key,
            client_secret: &self.config.client_secret,
            code,
            grant_type: "authorization_code",
            redirect_uri: &self.config.redirect_uri,
        };

        let response = self
            .http
            .post(self.endpoint("/oauth/access_token/")?)
            .json(&request)
            .send()
            .await?;

        read_envelope(response).await
    }
}
