//! Thumbnail object storage client
//!
//! PUTs thumbnail binaries into the Bunny storage zone and derives the
//! deterministic, time-stamped object path (and public CDN URL) for a
//! video's thumbnail.

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Object storage operations used by the upload flow.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload a binary under the given object path.
    async fn upload(&self, path: &str, data: Vec<u8>, content_type: &str) -> AppResult<()>;
}

/// Storage target for a thumbnail: where to PUT it and where it will be
/// publicly served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailTarget {
    /// Object path within the storage zone.
    pub object_path: String,

    /// Public CDN URL the path maps to.
    pub cdn_url: String,
}

/// Derive the thumbnail storage target for a video.
///
/// The path embeds the upload timestamp and the video id, so repeated
/// uploads never collide and the thumbnail is traceable to its video.
pub fn thumbnail_target(cdn_base_url: &str, video_id: &str, at: DateTime<Utc>) -> ThumbnailTarget {
    let file_name = format!("{}-{}-thumbnail", at.timestamp_millis(), video_id);
    let object_path = format!("thumbnails/{}", urlencoding::encode(&file_name));
    let cdn_url = format!("{}/{}", cdn_base_url, object_path);

    ThumbnailTarget {
        object_path,
        cdn_url,
    }
}

/// Bunny storage zone client.
pub struct BunnyStorageClient {
    http: reqwest::Client,
    config: StorageConfig,
}

impl BunnyStorageClient {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ObjectStorage for BunnyStorageClient {
    async fn upload(&self, path: &str, data: Vec<u8>, content_type: &str) -> AppResult<()> {
        let url = format!("{}/{}", self.config.storage_base_url, path);
        let response = self
            .http
            .put(&url)
            .header("AccessKey", &self.config.access_key)
            .header("Content-Type", content_type)
            .body(data)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Thumbnail upload failed ({}): {}", status, body);
            return Err(AppError::upload_failed(format!(
                "thumbnail PUT returned {}",
                status
            )));
        }
        Ok(())
    }
}
