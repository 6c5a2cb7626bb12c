use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::leaderboard;
use crate::models::{FantasySummary, MatchLeaderboardEntry, OverallLeaderboardEntry, TrendPoint};
use crate::routes::AppState;
use crate::scoring;

#[derive(Deserialize)]
pub struct MatchLeaderboardParams {
    #[serde(default = "default_match_limit")]
    limit: i64,
}

fn default_match_limit() -> i64 {
    20
}

#[derive(Deserialize)]
pub struct OverallLeaderboardParams {
    #[serde(default = "default_overall_limit")]
    limit: i64,
}

fn default_overall_limit() -> i64 {
    50
}

#[derive(Deserialize)]
pub struct TrendParams {
    #[serde(default = "default_trend_limit")]
    limit: i64,
}

fn default_trend_limit() -> i64 {
    10
}

#[derive(Serialize)]
pub struct ScoreResponse {
    status: String,
    scored: usize,
}

/// POST /api/fantasy/matches/{id}/score
pub async fn score_match(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let scored = scoring::score_match(&state.pool, match_id).await?;

    Ok(Json(ScoreResponse {
        status: "ok".to_string(),
        scored,
    }))
}

/// POST /api/fantasy/score-completed
pub async fn score_completed(
    State(state): State<AppState>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let scored = scoring::score_all_completed_matches(&state.pool).await?;

    Ok(Json(ScoreResponse {
        status: "ok".to_string(),
        scored,
    }))
}

/// GET /api/fantasy/matches/{id}/leaderboard?limit=
pub async fn match_leaderboard(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
    Query(params): Query<MatchLeaderboardParams>,
) -> Result<Json<Vec<MatchLeaderboardEntry>>, ApiError> {
    let entries = leaderboard::match_leaderboard(&state.pool, match_id, params.limit).await?;
    Ok(Json(entries))
}

/// GET /api/fantasy/leaderboard?limit=
pub async fn overall_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<OverallLeaderboardParams>,
) -> Result<Json<Vec<OverallLeaderboardEntry>>, ApiError> {
    let entries = leaderboard::overall_leaderboard(&state.pool, params.limit).await?;
    Ok(Json(entries))
}

/// GET /api/fantasy/players/{id}/trend?limit=
pub async fn player_trend(
    State(state): State<AppState>,
    Path(player_id): Path<i64>,
    Query(params): Query<TrendParams>,
) -> Result<Json<Vec<TrendPoint>>, ApiError> {
    let points = leaderboard::player_trend(&state.pool, player_id, params.limit).await?;
    Ok(Json(points))
}

/// GET /api/fantasy/summary
pub async fn summary(State(state): State<AppState>) -> Result<Json<FantasySummary>, ApiError> {
    let summary = leaderboard::summary(&state.pool).await?;
    Ok(Json(summary))
}
