//! Leaderboard aggregation: pure read queries over persisted fantasy point
//! records. No writes happen here; empty results are a normal state, not an
//! error.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use crate::db;
use crate::models::{
    CategoryBreakdown, FantasySummary, MatchLeaderboardEntry, OverallLeaderboardEntry, TrendPoint,
};

/// Ranked fantasy standings for one match: totals descending, ties in
/// insertion order, ranks assigned by sort position.
pub async fn match_leaderboard(
    pool: &SqlitePool,
    match_id: i64,
    limit: i64,
) -> Result<Vec<MatchLeaderboardEntry>, sqlx::Error> {
    let rows = db::fantasy_rows_for_match(pool, match_id, limit).await?;

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| MatchLeaderboardEntry {
            rank: index as i64 + 1,
            player_id: row.points.player_id,
            player_name: row.player_name,
            role: row.player_role,
            nationality: row.player_nationality,
            points: row.points.total_points,
            breakdown: CategoryBreakdown::from(&row.points),
        })
        .collect())
}

/// Cross-match standings: per-player sum, matches played, mean and best
/// single-match score, ranked by summed total.
pub async fn overall_leaderboard(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<OverallLeaderboardEntry>, sqlx::Error> {
    let rows = db::overall_fantasy_rows(pool, limit).await?;

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| OverallLeaderboardEntry {
            rank: index as i64 + 1,
            player_id: row.player_id,
            player_name: row.player_name,
            role: row.player_role,
            nationality: row.player_nationality,
            total_points: row.total_points,
            matches_played: row.matches_played,
            average_points: (row.average_points * 100.0).round() / 100.0,
            highest_score: row.highest_score,
        })
        .collect())
}

/// The most recent scored matches for one player, newest first, for
/// sparkline/trend display.
pub async fn player_trend(
    pool: &SqlitePool,
    player_id: i64,
    limit: i64,
) -> Result<Vec<TrendPoint>, sqlx::Error> {
    let rows = db::trend_rows_for_player(pool, player_id, limit).await?;

    Ok(rows
        .into_iter()
        .map(|row| TrendPoint {
            match_id: row.points.match_id,
            match_name: row.match_name,
            match_type: row.match_type,
            scheduled_at: row.scheduled_at,
            points: row.points.total_points,
            breakdown: CategoryBreakdown::from(&row.points),
            date: row.points.created_at.clone(),
        })
        .collect())
}

/// Dashboard composite: top five overall, ten latest scoring events and the
/// count of distinct players scored.
pub async fn summary(pool: &SqlitePool) -> Result<FantasySummary, sqlx::Error> {
    let top_performers = overall_leaderboard(pool, 5).await?;
    let recent_events = db::recent_scoring_events(pool, 10).await?;
    let total_players = db::count_scored_players(pool).await?;

    Ok(FantasySummary {
        top_performers,
        recent_events,
        total_players,
        last_updated: Utc::now().to_rfc3339(),
    })
}
