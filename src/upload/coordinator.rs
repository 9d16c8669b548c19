//! Upload coordination
//!
//! Sequences one upload attempt end to end: validate the draft, resolve
//! the user, create the hosting session, upload the video binary, upload
//! the thumbnail, then persist the metadata record. Each step's success is
//! a precondition for the next; a failed binary upload never leaves a
//! metadata record behind. One user-visible error per attempt, no
//! automatic retries.

use super::draft::UploadDraft;
use crate::config::{AppConfig, UploadLimits};
use crate::error::{AppError, AppResult};
use crate::services::{
    thumbnail_target, FixedWindowLimiter, MetadataStore, ObjectStorage, SessionProvider,
    VideoHost, VideoRecord,
};
use chrono::Utc;
use std::sync::Arc;

/// Title used when creating the hosting session; the real title is pushed
/// once both binaries are uploaded.
const PLACEHOLDER_TITLE: &str = "Temporary Title";

/// Runs the upload sequence against the external collaborators.
pub struct UploadCoordinator {
    host: Arc<dyn VideoHost>,
    storage: Arc<dyn ObjectStorage>,
    store: Arc<dyn MetadataStore>,
    sessions: Arc<dyn SessionProvider>,
    limiter: FixedWindowLimiter,
    limits: UploadLimits,
    cdn_base_url: String,
}

impl UploadCoordinator {
    pub fn new(
        host: Arc<dyn VideoHost>,
        storage: Arc<dyn ObjectStorage>,
        store: Arc<dyn MetadataStore>,
        sessions: Arc<dyn SessionProvider>,
        config: &AppConfig,
    ) -> Self {
        Self {
            host,
            storage,
            store,
            sessions,
            limiter: FixedWindowLimiter::from_config(&config.rate_limit),
            limits: config.limits,
            cdn_base_url: config.storage.cdn_base_url.clone(),
        }
    }

    /// Replace the rate limiter (tests use short windows).
    pub fn with_limiter(mut self, limiter: FixedWindowLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    /// Run one upload attempt. Returns the host-issued video id.
    pub async fn submit(&self, draft: UploadDraft) -> AppResult<String> {
        // 1. Validate before anything leaves the client.
        draft.validate(&self.limits)?;
        let video = draft
            .video
            .as_ref()
            .ok_or_else(|| AppError::validation("please upload a video"))?;
        let thumbnail = draft
            .thumbnail
            .as_ref()
            .ok_or_else(|| AppError::validation("please upload a thumbnail"))?;

        // 2. Resolve the authenticated user.
        let user = self
            .sessions
            .current_user()
            .await?
            .ok_or(AppError::Authentication)?;

        // 3. Create the hosting session.
        let video_id = self.host.create_video(PLACEHOLDER_TITLE).await?;
        tracing::info!("Upload attempt by {} -> video {}", user.user_id, video_id);

        // 4. Upload the video binary.
        self.host
            .upload_video(&video_id, video.data.clone())
            .await?;
        tracing::info!("Video binary uploaded for {}", video_id);

        // 5. Upload the thumbnail to its deterministic target.
        let target = thumbnail_target(&self.cdn_base_url, &video_id, Utc::now());
        self.storage
            .upload(&target.object_path, thumbnail.data.clone(), &thumbnail.content_type)
            .await?;
        tracing::info!("Thumbnail uploaded to {}", target.object_path);

        // 6. Persist metadata, gated by the per-user rate limit.
        self.limiter.check(&user.user_id)?;
        self.host
            .update_metadata(&video_id, &draft.title, &draft.description)
            .await?;

        let now = Utc::now();
        self.store
            .insert(VideoRecord {
                id: video_id.clone(),
                user_id: user.user_id,
                title: draft.title.clone(),
                description: draft.description.clone(),
                visibility: draft.visibility,
                video_url: self.host.playback_url(&video_id),
                thumbnail_url: target.cdn_url,
                duration_seconds: draft.duration_seconds,
                views: 0,
                created_at: now,
                updated_at: now,
            })
            .await?;

        // 7. Report success with the new video id.
        tracing::info!("Upload complete: {}", video_id);
        Ok(video_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::StaticSessionProvider;
    use crate::services::{InMemoryMetadataStore, Visibility};
    use crate::upload::draft::UploadFile;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct FakeHost {
        create_calls: AtomicUsize,
        upload_calls: AtomicUsize,
        fail_upload: bool,
    }

    #[async_trait]
    impl VideoHost for FakeHost {
        async fn create_video(&self, _title: &str) -> AppResult<String> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            Ok("vid-123".to_string())
        }

        async fn upload_video(&self, _video_id: &str, _data: Vec<u8>) -> AppResult<()> {
            self.upload_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_upload {
                return Err(AppError::upload_failed("video PUT returned 500"));
            }
            Ok(())
        }

        async fn update_metadata(
            &self,
            _video_id: &str,
            _title: &str,
            _description: &str,
        ) -> AppResult<()> {
            Ok(())
        }

        fn playback_url(&self, video_id: &str) -> String {
            format!("https://iframe.mediadelivery.net/embed/42/{}", video_id)
        }
    }

    #[derive(Default)]
    struct FakeStorage {
        upload_calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ObjectStorage for FakeStorage {
        async fn upload(&self, _path: &str, _data: Vec<u8>, _content_type: &str) -> AppResult<()> {
            self.upload_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::upload_failed("thumbnail PUT returned 500"));
            }
            Ok(())
        }
    }

    struct Harness {
        host: Arc<FakeHost>,
        storage: Arc<FakeStorage>,
        store: Arc<InMemoryMetadataStore>,
        coordinator: UploadCoordinator,
    }

    fn harness_with(host: FakeHost, storage: FakeStorage, authenticated: bool) -> Harness {
        let host = Arc::new(host);
        let storage = Arc::new(storage);
        let store = Arc::new(InMemoryMetadataStore::new());
        let sessions: Arc<dyn SessionProvider> = if authenticated {
            Arc::new(StaticSessionProvider::authenticated("user-1"))
        } else {
            Arc::new(StaticSessionProvider::anonymous())
        };

        let coordinator = UploadCoordinator::new(
            host.clone(),
            storage.clone(),
            store.clone(),
            sessions,
            &AppConfig::default(),
        );

        Harness {
            host,
            storage,
            store,
            coordinator,
        }
    }

    fn harness() -> Harness {
        harness_with(FakeHost::default(), FakeStorage::default(), true)
    }

    fn draft() -> UploadDraft {
        UploadDraft {
            video: Some(UploadFile::new(vec![1; 128], "demo.webm", "video/webm")),
            thumbnail: Some(UploadFile::new(vec![2; 32], "thumb.png", "image/png")),
            title: "Sprint demo".to_string(),
            description: "Walkthrough of the new upload flow".to_string(),
            visibility: Visibility::Public,
            duration_seconds: 42.0,
        }
    }

    #[tokio::test]
    async fn test_successful_submit_persists_record() {
        let h = harness();
        let video_id = h.coordinator.submit(draft()).await.unwrap();
        assert_eq!(video_id, "vid-123");

        let record = h.store.get("vid-123").await.unwrap().unwrap();
        assert!(record.video_url.ends_with("/vid-123"));
        assert!(record.thumbnail_url.contains("thumbnails/"));
        assert!(record.thumbnail_url.contains("vid-123"));
        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.duration_seconds, 42.0);
    }

    #[tokio::test]
    async fn test_thumbnail_failure_persists_nothing() {
        let h = harness_with(
            FakeHost::default(),
            FakeStorage {
                fail: true,
                ..Default::default()
            },
            true,
        );

        let err = h.coordinator.submit(draft()).await.unwrap_err();
        assert!(matches!(err, AppError::UploadFailed(_)));
        assert_eq!(h.store.len(), 0);
    }

    #[tokio::test]
    async fn test_video_upload_failure_skips_thumbnail_and_metadata() {
        let h = harness_with(
            FakeHost {
                fail_upload: true,
                ..Default::default()
            },
            FakeStorage::default(),
            true,
        );

        assert!(h.coordinator.submit(draft()).await.is_err());
        assert_eq!(h.storage.upload_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.store.len(), 0);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_hosting_service() {
        let h = harness();

        let mut missing_video = draft();
        missing_video.video = None;
        assert!(h.coordinator.submit(missing_video).await.is_err());

        let mut empty_title = draft();
        empty_title.title = String::new();
        assert!(h.coordinator.submit(empty_title).await.is_err());

        assert_eq!(h.host.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_submit_fails_before_upload() {
        let h = harness_with(FakeHost::default(), FakeStorage::default(), false);

        let err = h.coordinator.submit(draft()).await.unwrap_err();
        assert!(matches!(err, AppError::Authentication));
        assert_eq!(h.host.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_third_save_in_window_is_denied() {
        let h = harness();

        h.coordinator.submit(draft()).await.unwrap();
        h.coordinator.submit(draft()).await.unwrap();
        let err = h.coordinator.submit(draft()).await.unwrap_err();

        assert!(matches!(err, AppError::RateLimitExceeded));
        assert_eq!(h.store.len(), 2);
    }

    #[tokio::test]
    async fn test_save_allowed_after_window_elapses() {
        let h = harness();
        let coordinator = h
            .coordinator
            .with_limiter(FixedWindowLimiter::new(Duration::from_millis(30), 2));

        coordinator.submit(draft()).await.unwrap();
        coordinator.submit(draft()).await.unwrap();
        assert!(coordinator.submit(draft()).await.is_err());

        tokio::time::sleep(Duration::from_millis(40)).await;
        coordinator.submit(draft()).await.unwrap();
        assert_eq!(h.store.len(), 3);
    }
}
