//! Application configuration
//!
//! Service endpoints, access keys, and upload limits. Values come from the
//! environment in production (`AppConfig::from_env`); defaults exist so
//! tests can construct a config without any environment setup.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum accepted video file size (500 MiB).
pub const MAX_VIDEO_SIZE: u64 = 500 * 1024 * 1024;

/// Maximum accepted thumbnail file size (10 MiB).
pub const MAX_THUMBNAIL_SIZE: u64 = 10 * 1024 * 1024;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Video hosting (Bunny Stream) settings.
    pub hosting: HostingConfig,

    /// Thumbnail object storage (Bunny Storage) settings.
    pub storage: StorageConfig,

    /// Client-side upload limits.
    pub limits: UploadLimits,

    /// Per-user save rate limiting.
    pub rate_limit: RateLimitConfig,
}

/// Video hosting service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostingConfig {
    /// Base URL of the stream API (library-scoped endpoints live under it).
    pub stream_base_url: String,

    /// Base URL for playback embed links.
    pub embed_base_url: String,

    /// Stream library identifier.
    pub library_id: String,

    /// Stream API access key.
    pub access_key: String,
}

/// Object storage settings for thumbnails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base URL of the storage zone (PUT target).
    pub storage_base_url: String,

    /// Public CDN base URL mapped onto the storage zone.
    pub cdn_base_url: String,

    /// Storage API access key.
    pub access_key: String,
}

/// Maximum upload sizes, validated before any network call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UploadLimits {
    pub max_video_bytes: u64,
    pub max_thumbnail_bytes: u64,
}

/// Fixed-window rate limit parameters for metadata saves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window length in seconds.
    pub window_secs: u64,

    /// Maximum saves per window per fingerprint.
    pub max_per_window: u32,
}

impl Default for HostingConfig {
    fn default() -> Self {
        Self {
            stream_base_url: "https://video.bunnycdn.com/library".to_string(),
            embed_base_url: "https://iframe.mediadelivery.net/embed".to_string(),
            library_id: String::new(),
            access_key: String::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_base_url: "https://storage.bunnycdn.com/snapcast".to_string(),
            cdn_base_url: "https://snapcast.b-cdn.net".to_string(),
            access_key: String::new(),
        }
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_video_bytes: MAX_VIDEO_SIZE,
            max_thumbnail_bytes: MAX_THUMBNAIL_SIZE,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            max_per_window: 2,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hosting: HostingConfig::default(),
            storage: StorageConfig::default(),
            limits: UploadLimits::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Endpoint URLs fall back to their defaults; identifiers and access
    /// keys are required.
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("BUNNY_STREAM_BASE_URL") {
            config.hosting.stream_base_url = url;
        }
        if let Ok(url) = std::env::var("BUNNY_EMBED_BASE_URL") {
            config.hosting.embed_base_url = url;
        }
        if let Ok(url) = std::env::var("BUNNY_STORAGE_BASE_URL") {
            config.storage.storage_base_url = url;
        }
        if let Ok(url) = std::env::var("BUNNY_CDN_URL") {
            config.storage.cdn_base_url = url;
        }

        config.hosting.library_id = require_env("BUNNY_LIBRARY_ID")?;
        config.hosting.access_key = require_env("BUNNY_STREAM_ACCESS_KEY")?;
        config.storage.access_key = require_env("BUNNY_STORAGE_ACCESS_KEY")?;

        Ok(config)
    }
}

/// Read a required environment variable.
fn require_env(key: &str) -> AppResult<String> {
    std::env::var(key).map_err(|_| AppError::config(format!("missing required env: {}", key)))
}
