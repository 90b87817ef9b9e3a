use std::sync::Arc;

use vidhost_db::DbPool;

use crate::drive::DriveClient;
use crate::error::{FunctionError, FunctionResult};

/// Shared state handed to every function invocation.
///
/// Cheaply cloneable: the pool is reference-counted internally and the rest
/// sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database pool, absent when `DATABASE_URL` is not configured.
    pub pool: Option<DbPool>,
    /// Outbound Google Drive client.
    pub drive: Arc<DriveClient>,
}

impl AppState {
    /// Borrow the pool, or fail with [`FunctionError::DatabaseNotConfigured`].
    pub fn require_pool(&self) -> FunctionResult<&DbPool> {
        self.pool.as_ref().ok_or(FunctionError::DatabaseNotConfigured)
    }
}
