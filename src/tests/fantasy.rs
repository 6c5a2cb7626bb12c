use sqlx::sqlite::SqlitePool;

use super::{api_match, api_player, test_pool};
use crate::db;
use crate::leaderboard;
use crate::models::{BattingLine, BowlingLine, FieldingLine};
use crate::scoring;

async fn seed_match(pool: &SqlitePool, external_id: &str, name: &str) -> i64 {
    db::upsert_match(
        pool,
        &api_match(external_id, name, &["India", "Australia"], "Match finished"),
    )
    .await
    .unwrap()
}

async fn seed_player(pool: &SqlitePool, external_id: &str, name: &str) -> i64 {
    db::upsert_player(pool, &api_player(external_id, name, "India"))
        .await
        .unwrap()
}

fn batting(runs: i64, balls: i64, fours: i64, sixes: i64, is_out: bool) -> BattingLine {
    BattingLine {
        runs,
        balls_faced: balls,
        fours,
        sixes,
        is_out,
        dismissal_type: None,
    }
}

fn bowling(wickets: i64, maidens: i64) -> BowlingLine {
    BowlingLine {
        overs: 4.0,
        maidens,
        runs_conceded: 24,
        wickets,
    }
}

#[tokio::test]
async fn rescoring_overwrites_the_previous_breakdown() {
    let pool = test_pool().await;
    let match_id = seed_match(&pool, "m1", "India vs Australia").await;
    let player_id = seed_player(&pool, "p1", "Virat Kohli").await;

    // 30 runs, 2 fours, 1 six, not out: 30 + 4 + 4 + 10 = 48.
    db::upsert_performance(
        &pool,
        match_id,
        player_id,
        &batting(30, 20, 2, 1, false),
        &BowlingLine::default(),
        &FieldingLine::default(),
    )
    .await
    .unwrap();
    assert_eq!(scoring::score_match(&pool, match_id).await.unwrap(), 1);

    // Corrected scorecard: 10 runs, 1 four, out: 10 + 2 = 12.
    db::upsert_performance(
        &pool,
        match_id,
        player_id,
        &batting(10, 8, 1, 0, true),
        &BowlingLine::default(),
        &FieldingLine::default(),
    )
    .await
    .unwrap();
    assert_eq!(scoring::score_match(&pool, match_id).await.unwrap(), 1);

    let rows = db::fantasy_rows_for_match(&pool, match_id, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].points.total_points, 12);

    let player = db::get_player_by_external_id(&pool, "p1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(player.fantasy_points, 12);
}

#[tokio::test]
async fn match_leaderboard_ranks_by_points_descending() {
    let pool = test_pool().await;
    let match_id = seed_match(&pool, "m1", "India vs Australia").await;
    let batter = seed_player(&pool, "p1", "Virat Kohli").await;
    let anchor = seed_player(&pool, "p2", "Cheteshwar Pujara").await;
    let bowler = seed_player(&pool, "p3", "Jasprit Bumrah").await;

    // Century, no boundaries: 100 + 40 = 140.
    db::upsert_performance(
        &pool,
        match_id,
        batter,
        &batting(100, 110, 0, 0, false),
        &BowlingLine::default(),
        &FieldingLine::default(),
    )
    .await
    .unwrap();
    // 45 runs: 45 + 10 = 55.
    db::upsert_performance(
        &pool,
        match_id,
        anchor,
        &batting(45, 60, 0, 0, true),
        &BowlingLine::default(),
        &FieldingLine::default(),
    )
    .await
    .unwrap();
    // 5 wickets: 125 + 20 = 145.
    db::upsert_performance(
        &pool,
        match_id,
        bowler,
        &BattingLine::default(),
        &bowling(5, 0),
        &FieldingLine::default(),
    )
    .await
    .unwrap();

    scoring::score_match(&pool, match_id).await.unwrap();

    let board = leaderboard::match_leaderboard(&pool, match_id, 20).await.unwrap();
    assert_eq!(board.len(), 3);
    assert_eq!(
        board.iter().map(|e| e.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(
        board.iter().map(|e| e.points).collect::<Vec<_>>(),
        vec![145, 140, 55]
    );
    assert_eq!(board[0].player_name, "Jasprit Bumrah");
    assert_eq!(board[0].breakdown.bowling, 145);
}

#[tokio::test]
async fn overall_leaderboard_aggregates_across_matches() {
    let pool = test_pool().await;
    let m1 = seed_match(&pool, "m1", "India vs Australia, 1st T20").await;
    let m2 = seed_match(&pool, "m2", "India vs Australia, 2nd T20").await;
    let player_id = seed_player(&pool, "p1", "Virat Kohli").await;

    // 10 points in the first match, 40 in the second.
    db::upsert_performance(
        &pool,
        m1,
        player_id,
        &batting(10, 9, 0, 0, false),
        &BowlingLine::default(),
        &FieldingLine::default(),
    )
    .await
    .unwrap();
    db::upsert_performance(
        &pool,
        m2,
        player_id,
        &batting(30, 25, 0, 0, true),
        &BowlingLine::default(),
        &FieldingLine::default(),
    )
    .await
    .unwrap();

    scoring::score_match(&pool, m1).await.unwrap();
    scoring::score_match(&pool, m2).await.unwrap();

    let board = leaderboard::overall_leaderboard(&pool, 50).await.unwrap();
    assert_eq!(board.len(), 1);
    let entry = &board[0];
    assert_eq!(entry.rank, 1);
    assert_eq!(entry.total_points, 50);
    assert_eq!(entry.matches_played, 2);
    assert_eq!(entry.average_points, 25.0);
    assert_eq!(entry.highest_score, 40);

    let player = db::get_player_by_external_id(&pool, "p1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(player.fantasy_points, 50);
}

#[tokio::test]
async fn backfill_scores_only_unscored_completed_matches() {
    let pool = test_pool().await;
    let m1 = seed_match(&pool, "m1", "India vs Australia, 1st T20").await;
    let m2 = seed_match(&pool, "m2", "India vs Australia, 2nd T20").await;
    let player_id = seed_player(&pool, "p1", "Virat Kohli").await;

    for match_id in [m1, m2] {
        db::upsert_performance(
            &pool,
            match_id,
            player_id,
            &batting(20, 15, 1, 0, false),
            &BowlingLine::default(),
            &FieldingLine::default(),
        )
        .await
        .unwrap();
    }

    assert_eq!(scoring::score_all_completed_matches(&pool).await.unwrap(), 2);
    // Everything is scored now; a second pass finds nothing to do.
    assert_eq!(scoring::score_all_completed_matches(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn resync_does_not_clobber_derived_player_fields() {
    let pool = test_pool().await;
    let match_id = seed_match(&pool, "m1", "India vs Australia").await;
    let player_id = seed_player(&pool, "p1", "Virat Kohli").await;

    db::upsert_performance(
        &pool,
        match_id,
        player_id,
        &batting(50, 40, 4, 1, true),
        &BowlingLine::default(),
        &FieldingLine::default(),
    )
    .await
    .unwrap();
    scoring::score_match(&pool, match_id).await.unwrap();

    let before = db::get_player_by_external_id(&pool, "p1")
        .await
        .unwrap()
        .unwrap();
    assert!(before.fantasy_points > 0);

    // A later sweep delivers the same player again.
    seed_player(&pool, "p1", "Virat Kohli").await;

    let after = db::get_player_by_external_id(&pool, "p1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.fantasy_points, before.fantasy_points);
    assert_eq!(after.form, before.form);
    assert_eq!(after.is_injured, before.is_injured);
}

#[tokio::test]
async fn trend_returns_newest_entries_first() {
    let pool = test_pool().await;
    let m1 = seed_match(&pool, "m1", "India vs Australia, 1st T20").await;
    let m2 = seed_match(&pool, "m2", "India vs Australia, 2nd T20").await;
    let player_id = seed_player(&pool, "p1", "Virat Kohli").await;

    db::upsert_performance(
        &pool,
        m1,
        player_id,
        &batting(10, 9, 0, 0, false),
        &BowlingLine::default(),
        &FieldingLine::default(),
    )
    .await
    .unwrap();
    scoring::score_match(&pool, m1).await.unwrap();

    db::upsert_performance(
        &pool,
        m2,
        player_id,
        &batting(30, 25, 0, 0, true),
        &BowlingLine::default(),
        &FieldingLine::default(),
    )
    .await
    .unwrap();
    scoring::score_match(&pool, m2).await.unwrap();

    let trend = leaderboard::player_trend(&pool, player_id, 10).await.unwrap();
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].match_id, m2);
    assert_eq!(trend[0].points, 40);
    assert_eq!(trend[1].match_id, m1);
    assert_eq!(trend[1].points, 10);
}

#[tokio::test]
async fn summary_reports_scoring_activity() {
    let pool = test_pool().await;
    let match_id = seed_match(&pool, "m1", "India vs Australia").await;
    let p1 = seed_player(&pool, "p1", "Virat Kohli").await;
    let p2 = seed_player(&pool, "p2", "Jasprit Bumrah").await;

    db::upsert_performance(
        &pool,
        match_id,
        p1,
        &batting(60, 45, 5, 2, true),
        &BowlingLine::default(),
        &FieldingLine::default(),
    )
    .await
    .unwrap();
    db::upsert_performance(
        &pool,
        match_id,
        p2,
        &BattingLine::default(),
        &bowling(3, 1),
        &FieldingLine::default(),
    )
    .await
    .unwrap();
    scoring::score_match(&pool, match_id).await.unwrap();

    let summary = leaderboard::summary(&pool).await.unwrap();
    assert_eq!(summary.total_players, 2);
    assert_eq!(summary.top_performers.len(), 2);
    assert_eq!(summary.recent_events.len(), 2);
    assert!(!summary.last_updated.is_empty());
}
