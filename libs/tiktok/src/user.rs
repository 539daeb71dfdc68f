//! User profile retrieval

use serde::{Deserialize, Serialize};

use crate::client::{TikTokClient, read_envelope};
use crate::error::TikTokResult;

/// Fields requested from the user info endpoint.
pub const USER_INFO_FIELDS: &str = "open_id,union_id,avatar_url,display_name,username";

/// A TikTok user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub open_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub union_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: UserInfo,
}

impl TikTokClient {
    /// Fetch the profile of the user the access token belongs to.
    pub async fn user_info(&self, access_token: &str) -> TikTokResult<UserInfo> {
        let mut url = self.endpoint("/user/info/")?;
        url.query_pairs_mut().append_pair("fields", USER_INFO_FIELDS);

        let response = self.http.get(url).bearer_auth(access_token).send().await?;

        let data: UserData = read_envelope(response).await?;
        Ok(data.user)
    }
}
