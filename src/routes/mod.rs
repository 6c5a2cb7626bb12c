use std::sync::Arc;

use sqlx::sqlite::SqlitePool;

use crate::source::CricApiClient;
use crate::sync::SyncService;

pub mod fantasy;
pub mod health;
pub mod sync;

/// Shared handler state: the database pool and the sync orchestrator.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sync: Arc<SyncService<CricApiClient>>,
}
