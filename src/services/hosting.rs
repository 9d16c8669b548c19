//! Video hosting service client
//!
//! Talks to the Bunny Stream API: create a video session, PUT the binary
//! under it, and push title/description metadata. The upload coordinator
//! only sees the [`VideoHost`] trait.

use crate::config::HostingConfig;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;

/// Video hosting service operations used by the upload flow.
#[async_trait]
pub trait VideoHost: Send + Sync {
    /// Create a new video session, returning the host-issued video id.
    async fn create_video(&self, title: &str) -> AppResult<String>;

    /// Upload the video binary under an existing session id.
    async fn upload_video(&self, video_id: &str, data: Vec<u8>) -> AppResult<()>;

    /// Update title/description for an uploaded video.
    async fn update_metadata(&self, video_id: &str, title: &str, description: &str)
        -> AppResult<()>;

    /// Public playback (embed) URL for a video id.
    fn playback_url(&self, video_id: &str) -> String;
}

#[derive(Debug, Deserialize)]
struct CreateVideoResponse {
    guid: String,
}

/// Bunny Stream API client.
pub struct BunnyStreamClient {
    http: reqwest::Client,
    config: HostingConfig,
}

impl BunnyStreamClient {
    pub fn new(config: HostingConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn videos_url(&self) -> String {
        format!(
            "{}/{}/videos",
            self.config.stream_base_url, self.config.library_id
        )
    }

    fn video_url(&self, video_id: &str) -> String {
        format!("{}/{}", self.videos_url(), video_id)
    }
}

#[async_trait]
impl VideoHost for BunnyStreamClient {
    async fn create_video(&self, title: &str) -> AppResult<String> {
        let response = self
            .http
            .post(self.videos_url())
            .header("AccessKey", &self.config.access_key)
            .header("accept", "application/json")
            .json(&serde_json::json!({ "title": title, "collectionId": "" }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::credential(format!(
                "create video returned {}: {}",
                status, body
            )));
        }

        let created: CreateVideoResponse = response.json().await?;
        tracing::info!("Created hosting session {}", created.guid);
        Ok(created.guid)
    }

    async fn upload_video(&self, video_id: &str, data: Vec<u8>) -> AppResult<()> {
        let response = self
            .http
            .put(self.video_url(video_id))
            .header("AccessKey", &self.config.access_key)
            .header("Content-Type", "application/octet-stream")
            .body(data)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::upload_failed(format!(
                "video PUT returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn update_metadata(
        &self,
        video_id: &str,
        title: &str,
        description: &str,
    ) -> AppResult<()> {
        let response = self
            .http
            .post(self.video_url(video_id))
            .header("AccessKey", &self.config.access_key)
            .header("accept", "application/json")
            .json(&serde_json::json!({ "title": title, "description": description }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::upload_failed(format!(
                "metadata update returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    fn playback_url(&self, video_id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.embed_base_url, self.config.library_id, video_id
        )
    }
}
