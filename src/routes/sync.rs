use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::{Match, Player};
use crate::routes::AppState;
use crate::sync::SyncTarget;

#[derive(Serialize)]
pub struct SyncResponse {
    status: String,
    message: String,
    target: SyncTarget,
    synced: u64,
}

#[derive(Deserialize)]
pub struct SearchParams {
    name: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    query: String,
    synced: u64,
}

/// POST /api/admin/sync/{target}
pub async fn force_sync(
    State(state): State<AppState>,
    Path(target): Path<SyncTarget>,
) -> Result<Json<SyncResponse>, ApiError> {
    let synced = state.sync.force_sync(target).await?;

    Ok(Json(SyncResponse {
        status: "ok".to_string(),
        message: format!("synced {synced} records"),
        target,
        synced,
    }))
}

/// GET /api/players/search?name=
pub async fn search_players(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let synced = state.sync.search_and_sync(&params.name).await?;

    Ok(Json(SearchResponse {
        query: params.name,
        synced,
    }))
}

/// GET /api/sync/players/{external_id}
pub async fn refresh_player(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let player = state.sync.refresh_player(&external_id).await?;
    player.map(Json).ok_or(ApiError::NotFound)
}

/// GET /api/sync/matches/{external_id}
pub async fn refresh_match(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<Match>, ApiError> {
    let game = state.sync.refresh_match(&external_id).await?;
    game.map(Json).ok_or(ApiError::NotFound)
}
