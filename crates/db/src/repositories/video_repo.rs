//! Repository for the `videos` table.

use sqlx::{PgExecutor, PgPool};

use crate::models::site_setting::CURRENT_VIDEO_URL_KEY;
use crate::models::video::{CreateVideoRecord, VideoRecord};
use crate::repositories::SiteSettingRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, filename, original_name, file_size, video_url, upload_date, is_active";

/// Provides registry operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new active video row, returning it.
    ///
    /// No dedup: registering the same URL twice yields two rows.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateVideoRecord,
    ) -> Result<VideoRecord, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO videos (filename, original_name, file_size, video_url, is_active) \
             VALUES ($1, $2, $3, $4, true) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoRecord>(&query)
            .bind(&input.filename)
            .bind(&input.original_name)
            .bind(input.file_size)
            .bind(&input.video_url)
            .fetch_one(executor)
            .await
    }

    /// Insert a video and point `current_video_url` at it in one transaction.
    ///
    /// Either both writes land or neither does.
    pub async fn create_as_current(
        pool: &PgPool,
        input: &CreateVideoRecord,
    ) -> Result<VideoRecord, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let video = Self::create(&mut *tx, input).await?;
        SiteSettingRepo::upsert(&mut *tx, CURRENT_VIDEO_URL_KEY, &video.video_url).await?;

        tx.commit().await?;

        tracing::debug!(video_id = video.id, "Current video pointer updated");
        Ok(video)
    }

    /// List active videos, newest upload first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<VideoRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos \
             WHERE is_active = true \
             ORDER BY upload_date DESC, id DESC"
        );
        sqlx::query_as::<_, VideoRecord>(&query).fetch_all(pool).await
    }
}
