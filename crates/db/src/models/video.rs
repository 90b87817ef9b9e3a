//! Video registry entity model, list shape, and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidhost_core::types::{DbId, Timestamp};

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoRecord {
    pub id: DbId,
    pub filename: String,
    pub original_name: String,
    pub file_size: Option<i64>,
    pub video_url: String,
    pub upload_date: Timestamp,
    pub is_active: bool,
}

/// DTO for registering a new video. New rows are always active.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideoRecord {
    pub filename: String,
    pub original_name: String,
    pub file_size: Option<i64>,
    pub video_url: String,
}

/// Public listing shape returned by the `get-videos` function.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListItem {
    pub id: DbId,
    pub filename: String,
    pub original_name: String,
    pub file_size: Option<i64>,
    pub upload_date: Timestamp,
    pub video_url: String,
}

impl From<VideoRecord> for VideoListItem {
    fn from(record: VideoRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename,
            original_name: record.original_name,
            file_size: record.file_size,
            upload_date: record.upload_date,
            video_url: record.video_url,
        }
    }
}
