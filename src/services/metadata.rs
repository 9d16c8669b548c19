//! Video metadata store
//!
//! The persisted record for an uploaded video plus the query surface the
//! application lists videos with: visibility filtering, normalized-title
//! search, sort filters, and pagination. Production backs this with the
//! relational database; [`InMemoryMetadataStore`] is the reference
//! implementation used by tests.

use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Who can see a video. No other values are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

/// A persisted video record.
///
/// Created exactly once per successful upload sequence; identified by the
/// host-issued video id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    /// Host-issued video identifier.
    pub id: String,

    /// Owning user.
    pub user_id: String,

    pub title: String,
    pub description: String,
    pub visibility: Visibility,

    /// CDN playback (embed) URL.
    pub video_url: String,

    /// Public thumbnail URL.
    pub thumbnail_url: String,

    /// Duration in seconds.
    pub duration_seconds: f64,

    /// View counter.
    pub views: u64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sort orders for video listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortFilter {
    MostRecent,
    OldestFirst,
    MostViewed,
    LeastViewed,
}

impl Default for SortFilter {
    fn default() -> Self {
        Self::MostRecent
    }
}

/// A video listing query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoQuery {
    /// Title substring search, matched against the normalized title.
    pub search: Option<String>,

    pub sort: SortFilter,

    /// 1-based page number.
    pub page: usize,

    pub page_size: usize,

    /// The viewing user; private videos are visible to their owner only.
    pub viewer_id: Option<String>,
}

impl Default for VideoQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort: SortFilter::default(),
            page: 1,
            page_size: 8,
            viewer_id: None,
        }
    }
}

/// Pagination info for a listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_videos: usize,
    pub page_size: usize,
}

/// One page of a video listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPage {
    pub videos: Vec<VideoRecord>,
    pub pagination: Pagination,
}

/// Persistence operations used by the application.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert a new record.
    async fn insert(&self, record: VideoRecord) -> AppResult<()>;

    /// List videos matching a query.
    async fn list(&self, query: &VideoQuery) -> AppResult<VideoPage>;

    /// Fetch a single record by video id.
    async fn get(&self, video_id: &str) -> AppResult<Option<VideoRecord>>;
}

/// Normalize a title for search matching: lowercase with separators
/// (`-`, `.`, space) stripped.
fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '-' | '.' | ' '))
        .collect()
}

/// In-memory metadata store.
pub struct InMemoryMetadataStore {
    records: RwLock<Vec<VideoRecord>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for InMemoryMetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn insert(&self, record: VideoRecord) -> AppResult<()> {
        tracing::info!("Persisting video record {}", record.id);
        self.records.write().push(record);
        Ok(())
    }

    async fn list(&self, query: &VideoQuery) -> AppResult<VideoPage> {
        let records = self.records.read();

        let mut matches: Vec<VideoRecord> = records
            .iter()
            .filter(|r| {
                r.visibility == Visibility::Public
                    || query.viewer_id.as_deref() == Some(r.user_id.as_str())
            })
            .filter(|r| match query.search.as_deref() {
                Some(search) if !search.trim().is_empty() => {
                    normalize_title(&r.title).contains(&normalize_title(search))
                }
                _ => true,
            })
            .cloned()
            .collect();

        match query.sort {
            SortFilter::MostRecent => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortFilter::OldestFirst => matches.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortFilter::MostViewed => matches.sort_by(|a, b| b.views.cmp(&a.views)),
            SortFilter::LeastViewed => matches.sort_by(|a, b| a.views.cmp(&b.views)),
        }

        let total_videos = matches.len();
        let page_size = query.page_size.max(1);
        let total_pages = total_videos.div_ceil(page_size);
        let page = query.page.max(1);

        let videos = matches
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();

        Ok(VideoPage {
            videos,
            pagination: Pagination {
                current_page: page,
                total_pages,
                total_videos,
                page_size,
            },
        })
    }

    async fn get(&self, video_id: &str) -> AppResult<Option<VideoRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|r| r.id == video_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, user: &str, title: &str, visibility: Visibility, views: u64, day: u32) -> VideoRecord {
        let at = Utc.with_ymd_and_hms(2026, 1, day, 0, 0, 0).unwrap();
        VideoRecord {
            id: id.to_string(),
            user_id: user.to_string(),
            title: title.to_string(),
            description: "desc".to_string(),
            visibility,
            video_url: format!("https://embed/42/{}", id),
            thumbnail_url: format!("https://cdn/thumbnails/{}", id),
            duration_seconds: 10.0,
            views,
            created_at: at,
            updated_at: at,
        }
    }

    async fn seeded() -> InMemoryMetadataStore {
        let store = InMemoryMetadataStore::new();
        store
            .insert(record("a", "u1", "Sprint Demo", Visibility::Public, 5, 1))
            .await
            .unwrap();
        store
            .insert(record("b", "u1", "Design Review", Visibility::Private, 9, 2))
            .await
            .unwrap();
        store
            .insert(record("c", "u2", "On-boarding walkthrough", Visibility::Public, 2, 3))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_visibility_filtering() {
        let store = seeded().await;

        // Anonymous viewer sees public videos only
        let page = store.list(&VideoQuery::default()).await.unwrap();
        assert_eq!(page.pagination.total_videos, 2);

        // The owner also sees their private video
        let page = store
            .list(&VideoQuery {
                viewer_id: Some("u1".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total_videos, 3);
    }

    #[tokio::test]
    async fn test_normalized_title_search() {
        let store = seeded().await;

        // "on boarding" matches "On-boarding" after normalization
        let page = store
            .list(&VideoQuery {
                search: Some("on boarding".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.videos.len(), 1);
        assert_eq!(page.videos[0].id, "c");
    }

    #[tokio::test]
    async fn test_sort_filters() {
        let store = seeded().await;
        let viewer = Some("u1".to_string());

        let ids = |page: VideoPage| -> Vec<String> {
            page.videos.into_iter().map(|v| v.id).collect()
        };

        let page = store
            .list(&VideoQuery {
                viewer_id: viewer.clone(),
                sort: SortFilter::MostRecent,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(page), vec!["c", "b", "a"]);

        let page = store
            .list(&VideoQuery {
                viewer_id: viewer.clone(),
                sort: SortFilter::OldestFirst,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(page), vec!["a", "b", "c"]);

        let page = store
            .list(&VideoQuery {
                viewer_id: viewer,
                sort: SortFilter::MostViewed,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(ids(page), vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_pagination() {
        let store = seeded().await;
        let page = store
            .list(&VideoQuery {
                viewer_id: Some("u1".to_string()),
                page: 2,
                page_size: 2,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.videos.len(), 1);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.pagination.current_page, 2);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let store = seeded().await;
        assert_eq!(store.get("b").await.unwrap().unwrap().title, "Design Review");
        assert!(store.get("missing").await.unwrap().is_none());
    }
}
