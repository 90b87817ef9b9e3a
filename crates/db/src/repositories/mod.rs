//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods that may run inside a caller's transaction are generic over
//! [`sqlx::PgExecutor`] so they accept either `&PgPool` or `&mut *tx`.

pub mod site_setting_repo;
pub mod video_repo;

pub use site_setting_repo::SiteSettingRepo;
pub use video_repo::VideoRepo;
