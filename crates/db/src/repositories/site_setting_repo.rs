//! Repository for the `site_settings` key/value table.

use sqlx::{PgExecutor, PgPool};

use crate::models::site_setting::SiteSetting;

const COLUMNS: &str = "setting_key, setting_value, updated_at";

/// Provides read/write access to site settings.
pub struct SiteSettingRepo;

impl SiteSettingRepo {
    /// Fetch a setting by key.
    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<SiteSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_settings WHERE setting_key = $1");
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Set a setting's value and bump `updated_at`, creating the row if absent.
    ///
    /// Concurrent writers are not ordered: the last commit wins.
    pub async fn upsert<'e, E>(
        executor: E,
        key: &str,
        value: &str,
    ) -> Result<SiteSetting, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO site_settings (setting_key, setting_value, updated_at) \
             VALUES ($1, $2, NOW()) \
             ON CONFLICT (setting_key) \
             DO UPDATE SET setting_value = EXCLUDED.setting_value, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(key)
            .bind(value)
            .fetch_one(executor)
            .await
    }
}
