//! Upload draft and validation
//!
//! Everything the user submits from the upload form, validated before any
//! network call is made.

use crate::config::UploadLimits;
use crate::error::{AppError, AppResult};
use crate::services::Visibility;

/// One file attached to the draft.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

impl UploadFile {
    pub fn new(
        data: Vec<u8>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            data,
            file_name: file_name.into(),
            content_type: content_type.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// A pending upload: files plus the metadata the user filled in.
#[derive(Debug, Clone)]
pub struct UploadDraft {
    pub video: Option<UploadFile>,
    pub thumbnail: Option<UploadFile>,
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
    pub duration_seconds: f64,
}

impl UploadDraft {
    /// Validate the draft against the configured limits.
    ///
    /// Both files must be present, non-empty, and under their maximum
    /// sizes; title and description must be non-empty. Nothing leaves the
    /// client until this passes.
    pub fn validate(&self, limits: &UploadLimits) -> AppResult<()> {
        let video = self
            .video
            .as_ref()
            .ok_or_else(|| AppError::validation("please upload a video"))?;
        let thumbnail = self
            .thumbnail
            .as_ref()
            .ok_or_else(|| AppError::validation("please upload a thumbnail"))?;

        if video.data.is_empty() {
            return Err(AppError::validation("video file is empty"));
        }
        if thumbnail.data.is_empty() {
            return Err(AppError::validation("thumbnail file is empty"));
        }

        if video.size() > limits.max_video_bytes {
            return Err(AppError::validation(format!(
                "video exceeds maximum size ({} bytes)",
                limits.max_video_bytes
            )));
        }
        if thumbnail.size() > limits.max_thumbnail_bytes {
            return Err(AppError::validation(format!(
                "thumbnail exceeds maximum size ({} bytes)",
                limits.max_thumbnail_bytes
            )));
        }

        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(AppError::validation("please fill in all the details"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> UploadDraft {
        UploadDraft {
            video: Some(UploadFile::new(vec![0; 64], "demo.webm", "video/webm")),
            thumbnail: Some(UploadFile::new(vec![0; 16], "thumb.png", "image/png")),
            title: "Sprint demo".to_string(),
            description: "Walkthrough of the new upload flow".to_string(),
            visibility: Visibility::Public,
            duration_seconds: 12.5,
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(valid_draft().validate(&UploadLimits::default()).is_ok());
    }

    #[test]
    fn test_missing_files_rejected() {
        let limits = UploadLimits::default();

        let mut draft = valid_draft();
        draft.video = None;
        assert!(matches!(
            draft.validate(&limits).unwrap_err(),
            AppError::Validation(_)
        ));

        let mut draft = valid_draft();
        draft.thumbnail = None;
        assert!(draft.validate(&limits).is_err());
    }

    #[test]
    fn test_empty_fields_rejected() {
        let limits = UploadLimits::default();

        let mut draft = valid_draft();
        draft.title = "   ".to_string();
        assert!(draft.validate(&limits).is_err());

        let mut draft = valid_draft();
        draft.description = String::new();
        assert!(draft.validate(&limits).is_err());
    }

    #[test]
    fn test_oversized_files_rejected() {
        let limits = UploadLimits {
            max_video_bytes: 32,
            max_thumbnail_bytes: 8,
        };

        let err = valid_draft().validate(&limits).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
