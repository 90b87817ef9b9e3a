use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Whole-request timeout in seconds (default: `330`).
    ///
    /// Kept above the Drive download timeout so the upstream timeout fires
    /// first and produces its own 408 body.
    pub request_timeout_secs: u64,
    /// Postgres connection string. Functions touching the registry answer
    /// 500 `Database not configured` when this is unset.
    pub database_url: Option<String>,
    /// Outbound Google Drive settings.
    pub drive: DriveConfig,
}

/// Settings for the Drive downloader.
#[derive(Debug, Clone)]
pub struct DriveConfig {
    /// Drive origin (default: `https://drive.google.com`).
    pub base_url: String,
    /// Timeout for each outbound GET, in seconds (default: `300`).
    pub timeout_secs: u64,
    /// Directory for scratch files (default: the OS temp dir).
    pub scratch_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `REQUEST_TIMEOUT_SECS` | `330`                      |
    /// | `DATABASE_URL`         | unset                      |
    /// | `DRIVE_BASE_URL`       | `https://drive.google.com` |
    /// | `DRIVE_TIMEOUT_SECS`   | `300`                      |
    /// | `SCRATCH_DIR`          | OS temp dir                |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "330".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            host,
            port,
            request_timeout_secs,
            database_url,
            drive: DriveConfig::from_env(),
        }
    }
}

impl DriveConfig {
    /// Load the `DRIVE_*` and `SCRATCH_DIR` variables with defaults.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("DRIVE_BASE_URL").unwrap_or_else(|_| "https://drive.google.com".into());

        let timeout_secs: u64 = std::env::var("DRIVE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("DRIVE_TIMEOUT_SECS must be a valid u64");

        let scratch_dir = std::env::var("SCRATCH_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir());

        Self {
            base_url,
            timeout_secs,
            scratch_dir,
        }
    }
}
