//! Video upload and publish surface of the content posting API

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::client::{TikTokClient, read_envelope};
use crate::error::TikTokResult;

/// Maximum description length accepted by the provider, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 2200;

/// Fields requested from the video list endpoint.
pub const VIDEO_LIST_FIELDS: &str = "id,title,cover_image_url,create_time,share_url";

/// Uploads can take a while for large files.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Audience of a published video; `as_str` spells it exactly as the provider does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrivacyLevel {
    #[default]
    PublicToEveryone,
    MutualFollowFriends,
    SelfOnly,
}

impl PrivacyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::PublicToEveryone => "PUBLIC_TO_EVERYONE",
            PrivacyLevel::MutualFollowFriends => "MUTUAL_FOLLOW_FRIENDS",
            PrivacyLevel::SelfOnly => "SELF_ONLY",
        }
    }
}

impl FromStr for PrivacyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PUBLIC_TO_EVERYONE" => Ok(PrivacyLevel::PublicToEveryone),
            "MUTUAL_FOLLOW_FRIENDS" => Ok(PrivacyLevel::MutualFollowFriends),
            "SELF_ONLY" => Ok(PrivacyLevel::SelfOnly),
            other => Err(format!("Unknown privacy level: {other}")),
        }
    }
}

/// A video upload request, forwarded to the provider as multipart form data.
#[derive(Debug, Clone)]
pub struct VideoUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub description: String,
    pub privacy_level: PrivacyLevel,
}

impl VideoUpload {
    /// Check the fields the provider would reject outright.
    pub fn validate(&self) -> Result<(), String> {
        if self.data.is_empty() {
            return Err("Video file is empty".to_string());
        }

        if !self.content_type.starts_with("video/") {
            return Err(format!(
                "Only video files are allowed, got {}",
                self.content_type
            ));
        }

        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(format!(
                "Description must be at most {MAX_DESCRIPTION_CHARS} characters long"
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct UploadData {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideoListData {
    #[serde(default)]
    videos: Vec<serde_json::Value>,
}

impl TikTokClient {
    /// Upload a video on behalf of the authorized user, returning the
    /// provider-assigned video id.
    pub async fn upload_video(
        &self,
        access_token: &str,
        upload: VideoUpload,
    ) -> TikTokResult<String> {
        info!(
            file_name = %upload.file_name,
            size = upload.data.len(),
            privacy_level = upload.privacy_level.as_str(),
            "Uploading video to TikTok"
        );

        let part = Part::bytes(upload.data)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;

        let form = Form::new()
            .part("video", part)
            .text("description", upload.description)
            .text("privacy_level", upload.privacy_level.as_str());

        let response = self
            .http
            .post(self.endpoint("/share/video/upload/")?)
            .bearer_auth(access_token)
            .timeout(UPLOAD_TIMEOUT)
            .multipart(form)
            .send()
            .await?;

        let data: UploadData = read_envelope(response).await?;
        Ok(data.video_id)
    }

    /// Fetch the publish status of an uploaded video, passed through verbatim.
    pub async fn publish_status(
        &self,
        access_token: &str,
        video_id: &str,
    ) -> TikTokResult<serde_json::Value> {
        let mut url = self.endpoint("/share/video/status/")?;
        url.query_pairs_mut().append_pair("video_id", video_id);

        let response = self.http.get(url).bearer_auth(access_token).send().await?;

        read_envelope(response).await
    }

    /// List the authorized user's videos.
    pub async fn list_videos(&self, access_token: &str) -> TikTokResult<Vec<serde_json::Value>> {
        let mut url = self.endpoint("/video/list/")?;
        url.query_pairs_mut().append_pair("fields", VIDEO_LIST_FIELDS);

        let response = self.http.get(url).bearer_auth(access_token).send().await?;

        let data: VideoListData = read_envelope(response).await?;
        Ok(data.videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> VideoUpload {
        VideoUpload {
            file_name: "clip.mp4".to_string(),
            content_type: "video/mp4".to_string(),
            data: vec![0u8; 16],
            description: "a test clip".to_string(),
            privacy_level: PrivacyLevel::PublicToEveryone,
        }
    }

    #[test]
    fn test_privacy_level_round_trip() {
        for (text, level) in [
            ("PUBLIC_TO_EVERYONE", PrivacyLevel::PublicToEveryone),
            ("MUTUAL_FOLLOW_FRIENDS", PrivacyLevel::MutualFollowFriends),
            ("SELF_ONLY", PrivacyLevel::SelfOnly),
        ] {
            assert_eq!(text.parse::<PrivacyLevel>().unwrap(), level);
            assert_eq!(level.as_str(), text);
        }

        assert!("friends".parse::<PrivacyLevel>().is_err());
    }

    #[test]
    fn test_privacy_level_default_is_public() {
        assert_eq!(PrivacyLevel::default(), PrivacyLevel::PublicToEveryone);
    }

    #[test]
    fn test_validate_accepts_well_formed_upload() {
        assert!(upload().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_file() {
        let mut upload = upload();
        upload.data.clear();
        assert!(upload.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_video_content_type() {
        let mut upload = upload();
        upload.content_type = "image/png".to_string();
        let err = upload.validate().unwrap_err();
        assert!(err.contains("Only video files"));
    }

    #[test]
    fn test_validate_enforces_description_limit() {
        let mut upload = upload();
        upload.description = "x".repeat(MAX_DESCRIPTION_CHARS);
        assert!(upload.validate().is_ok());

        upload.description.push('x');
        assert!(upload.validate().is_err());
    }

    #[test]
    fn test_upload_data_deserializes_video_id() {
        let data: UploadData = serde_json::from_str(r#"{"video_id": "v123"}"#).unwrap();
        assert_eq!(data.video_id, "v123");
    }

    #[test]
    fn test_video_list_defaults_to_empty() {
        let data: VideoListData = serde_json::from_str("{}").unwrap();
        assert!(data.videos.is_empty());
    }
}
