//! Key/value site settings.

use serde::Serialize;
use sqlx::FromRow;
use vidhost_core::types::Timestamp;

/// Key holding the URL every visitor is shown.
pub const CURRENT_VIDEO_URL_KEY: &str = "current_video_url";

/// A row from the `site_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSetting {
    pub setting_key: String,
    pub setting_value: String,
    pub updated_at: Timestamp,
}
