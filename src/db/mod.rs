use chrono::Utc;
use sqlx::sqlite::SqlitePool;

use crate::models::*;
use crate::scoring::PointBreakdown;
use crate::source::{ApiCountry, ApiMatch, ApiPlayer, ApiSeries};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS countries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS series (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    start_date TEXT,
    end_date TEXT,
    odi INTEGER NOT NULL DEFAULT 0,
    t20 INTEGER NOT NULL DEFAULT 0,
    test INTEGER NOT NULL DEFAULT 0,
    squads INTEGER NOT NULL DEFAULT 0,
    matches INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS teams (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id TEXT,
    name TEXT NOT NULL UNIQUE,
    short_name TEXT NOT NULL,
    country TEXT NOT NULL,
    logo TEXT,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id TEXT UNIQUE,
    fallback_key TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    country TEXT,
    nationality TEXT NOT NULL DEFAULT 'Unknown',
    role TEXT NOT NULL DEFAULT 'unknown',
    batting_style TEXT,
    bowling_style TEXT,
    team_id INTEGER REFERENCES teams(id),
    form TEXT NOT NULL DEFAULT 'average',
    is_injured INTEGER NOT NULL DEFAULT 0,
    matches INTEGER NOT NULL DEFAULT 0,
    runs INTEGER NOT NULL DEFAULT 0,
    wickets INTEGER NOT NULL DEFAULT 0,
    catches INTEGER NOT NULL DEFAULT 0,
    stumps INTEGER NOT NULL DEFAULT 0,
    run_outs INTEGER NOT NULL DEFAULT 0,
    fantasy_points INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS matches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    match_type TEXT NOT NULL DEFAULT 'T20',
    status TEXT NOT NULL DEFAULT 'upcoming',
    scheduled_at TEXT,
    team1_id INTEGER NOT NULL REFERENCES teams(id),
    team2_id INTEGER NOT NULL REFERENCES teams(id),
    venue TEXT,
    winner_team_id INTEGER REFERENCES teams(id),
    team1_score TEXT,
    team2_score TEXT,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS player_performances (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id INTEGER NOT NULL REFERENCES matches(id),
    player_id INTEGER NOT NULL REFERENCES players(id),
    runs INTEGER NOT NULL DEFAULT 0,
    balls_faced INTEGER NOT NULL DEFAULT 0,
    fours INTEGER NOT NULL DEFAULT 0,
    sixes INTEGER NOT NULL DEFAULT 0,
    is_out INTEGER NOT NULL DEFAULT 0,
    dismissal_type TEXT,
    overs REAL NOT NULL DEFAULT 0,
    maidens INTEGER NOT NULL DEFAULT 0,
    runs_conceded INTEGER NOT NULL DEFAULT 0,
    wickets INTEGER NOT NULL DEFAULT 0,
    catches INTEGER NOT NULL DEFAULT 0,
    stumps INTEGER NOT NULL DEFAULT 0,
    run_outs INTEGER NOT NULL DEFAULT 0,
    UNIQUE(match_id, player_id)
);

CREATE TABLE IF NOT EXISTS fantasy_points (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_id INTEGER NOT NULL REFERENCES matches(id),
    player_id INTEGER NOT NULL REFERENCES players(id),
    runs INTEGER NOT NULL DEFAULT 0,
    fours INTEGER NOT NULL DEFAULT 0,
    sixes INTEGER NOT NULL DEFAULT 0,
    thirty_bonus INTEGER NOT NULL DEFAULT 0,
    fifty_bonus INTEGER NOT NULL DEFAULT 0,
    hundred_bonus INTEGER NOT NULL DEFAULT 0,
    wickets INTEGER NOT NULL DEFAULT 0,
    maidens INTEGER NOT NULL DEFAULT 0,
    three_wicket_bonus INTEGER NOT NULL DEFAULT 0,
    five_wicket_bonus INTEGER NOT NULL DEFAULT 0,
    catches INTEGER NOT NULL DEFAULT 0,
    stumps INTEGER NOT NULL DEFAULT 0,
    run_outs INTEGER NOT NULL DEFAULT 0,
    duck INTEGER NOT NULL DEFAULT 0,
    total_points INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    UNIQUE(match_id, player_id)
);

CREATE INDEX IF NOT EXISTS idx_fantasy_points_player ON fantasy_points(player_id);
CREATE INDEX IF NOT EXISTS idx_performances_match ON player_performances(match_id);
"#;

/// Create all tables and indexes. Safe to call on every startup.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// Lowercased, whitespace-collapsed player name, used as the upsert key when
/// the source record carries no external id.
pub fn player_fallback_key(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First three letters of the team name, uppercased. Can collide across
/// similarly named teams; the source does not de-collide and neither do we.
pub fn derive_short_name(name: &str) -> String {
    name.chars().take(3).collect::<String>().to_uppercase()
}

// Entity upserts. All keyed on natural/external identifiers and executed as
// single INSERT ... ON CONFLICT statements so concurrent sweeps cannot race
// two rows into existence for the same identity.

pub async fn upsert_country(pool: &SqlitePool, record: &ApiCountry) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"INSERT INTO countries (external_id, name, updated_at)
           VALUES (?, ?, ?)
           ON CONFLICT(external_id) DO UPDATE SET
               name = excluded.name,
               updated_at = excluded.updated_at
           RETURNING id"#,
    )
    .bind(&record.id)
    .bind(&record.name)
    .bind(now())
    .fetch_one(pool)
    .await
}

pub async fn upsert_series(pool: &SqlitePool, record: &ApiSeries) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"INSERT INTO series (external_id, name, start_date, end_date, odi, t20, test, squads, matches, updated_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
           ON CONFLICT(external_id) DO UPDATE SET
               name = excluded.name,
               start_date = excluded.start_date,
               end_date = excluded.end_date,
               odi = excluded.odi,
               t20 = excluded.t20,
               test = excluded.test,
               squads = excluded.squads,
               matches = excluded.matches,
               updated_at = excluded.updated_at
           RETURNING id"#,
    )
    .bind(&record.id)
    .bind(&record.name)
    .bind(&record.start_date)
    .bind(&record.end_date)
    .bind(record.odi)
    .bind(record.t20)
    .bind(record.test)
    .bind(record.squads)
    .bind(record.matches)
    .bind(now())
    .fetch_one(pool)
    .await
}

/// Atomic find-or-create for a team by exact name. Returns the team's id.
pub async fn resolve_or_create_team(pool: &SqlitePool, name: &str) -> Result<i64, sqlx::Error> {
    let name = name.trim();
    sqlx::query_scalar(
        r#"INSERT INTO teams (name, short_name, country, updated_at)
           VALUES (?, ?, ?, ?)
           ON CONFLICT(name) DO UPDATE SET updated_at = excluded.updated_at
           RETURNING id"#,
    )
    .bind(name)
    .bind(derive_short_name(name))
    .bind(name)
    .bind(now())
    .fetch_one(pool)
    .await
}

/// Upsert a player from a raw source record, keyed by external id when
/// present and by the synthesized name key otherwise. Identity and style
/// fields are refreshed on every sighting; accumulated stats, form and the
/// injury flag are owned downstream and left untouched.
pub async fn upsert_player(pool: &SqlitePool, record: &ApiPlayer) -> Result<i64, sqlx::Error> {
    let team_id = match record.country.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(country) => Some(resolve_or_create_team(pool, country).await?),
        None => None,
    };

    let fallback_key = player_fallback_key(&record.name);
    let nationality = record.country.clone().unwrap_or_else(|| "Unknown".into());
    let role = PlayerRole::from_source(record.role.as_deref().unwrap_or(""));

    match record.id.as_deref().filter(|id| !id.is_empty()) {
        Some(external_id) => {
            sqlx::query_scalar(
                r#"INSERT INTO players
                       (external_id, fallback_key, name, country, nationality, role,
                        batting_style, bowling_style, team_id, updated_at)
                   VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                   ON CONFLICT(external_id) DO UPDATE SET
                       fallback_key = excluded.fallback_key,
                       name = excluded.name,
                       country = excluded.country,
                       nationality = excluded.nationality,
                       role = excluded.role,
                       batting_style = excluded.batting_style,
                       bowling_style = excluded.bowling_style,
                       team_id = COALESCE(excluded.team_id, players.team_id),
                       updated_at = excluded.updated_at
                   ON CONFLICT(fallback_key) DO UPDATE SET
                       external_id = excluded.external_id,
                       name = excluded.name,
                       country = excluded.country,
                       nationality = excluded.nationality,
                       role = excluded.role,
                       batting_style = excluded.batting_style,
                       bowling_style = excluded.bowling_style,
                       team_id = COALESCE(excluded.team_id, players.team_id),
                       updated_at = excluded.updated_at
                   RETURNING id"#,
            )
            .bind(external_id)
            .bind(&fallback_key)
            .bind(&record.name)
            .bind(&record.country)
            .bind(&nationality)
            .bind(role)
            .bind(&record.batting_style)
            .bind(&record.bowling_style)
            .bind(team_id)
            .bind(now())
            .fetch_one(pool)
            .await
        }
        None => {
            sqlx::query_scalar(
                r#"INSERT INTO players
                       (fallback_key, name, country, nationality, role,
                        batting_style, bowling_style, team_id, updated_at)
                   VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                   ON CONFLICT(fallback_key) DO UPDATE SET
                       name = excluded.name,
                       country = excluded.country,
                       nationality = excluded.nationality,
                       role = excluded.role,
                       batting_style = excluded.batting_style,
                       bowling_style = excluded.bowling_style,
                       team_id = COALESCE(excluded.team_id, players.team_id),
                       updated_at = excluded.updated_at
                   RETURNING id"#,
            )
            .bind(&fallback_key)
            .bind(&record.name)
            .bind(&record.country)
            .bind(&nationality)
            .bind(role)
            .bind(&record.batting_style)
            .bind(&record.bowling_style)
            .bind(team_id)
            .bind(now())
            .fetch_one(pool)
            .await
        }
    }
}

fn format_innings(score: &crate::source::ApiInningsScore) -> String {
    format!("{}/{} ({})", score.r, score.w, score.o)
}

/// Upsert a match from a raw source record. Both participant teams are
/// resolved (created if unseen); records without two team names are rejected
/// by the orchestrator before this is called.
pub async fn upsert_match(pool: &SqlitePool, record: &ApiMatch) -> Result<i64, sqlx::Error> {
    let team1_id = resolve_or_create_team(pool, &record.teams[0]).await?;
    let team2_id = resolve_or_create_team(pool, &record.teams[1]).await?;

    let status = MatchStatus::from_source(record.status.as_deref().unwrap_or(""));
    let match_type = MatchFormat::from_source(record.match_type.as_deref().unwrap_or(""));
    // Prefer the explicit GMT timestamp; fall back to the plain date field.
    let scheduled_at = record.date_time_gmt.clone().or_else(|| record.date.clone());
    let team1_score = record.score.first().map(format_innings);
    let team2_score = record.score.get(1).map(format_innings);

    sqlx::query_scalar(
        r#"INSERT INTO matches
               (external_id, name, match_type, status, scheduled_at,
                team1_id, team2_id, venue, team1_score, team2_score, updated_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
           ON CONFLICT(external_id) DO UPDATE SET
               name = excluded.name,
               match_type = excluded.match_type,
               status = excluded.status,
               scheduled_at = excluded.scheduled_at,
               team1_id = excluded.team1_id,
               team2_id = excluded.team2_id,
               venue = excluded.venue,
               team1_score = COALESCE(excluded.team1_score, matches.team1_score),
               team2_score = COALESCE(excluded.team2_score, matches.team2_score),
               updated_at = excluded.updated_at
           RETURNING id"#,
    )
    .bind(&record.id)
    .bind(&record.name)
    .bind(match_type)
    .bind(status)
    .bind(scheduled_at)
    .bind(team1_id)
    .bind(team2_id)
    .bind(&record.venue)
    .bind(team1_score)
    .bind(team2_score)
    .bind(now())
    .fetch_one(pool)
    .await
}

/// Seed or refresh the raw statistics for one (match, player) pair.
pub async fn upsert_performance(
    pool: &SqlitePool,
    match_id: i64,
    player_id: i64,
    batting: &BattingLine,
    bowling: &BowlingLine,
    fielding: &FieldingLine,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"INSERT INTO player_performances
               (match_id, player_id, runs, balls_faced, fours, sixes, is_out, dismissal_type,
                overs, maidens, runs_conceded, wickets, catches, stumps, run_outs)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
           ON CONFLICT(match_id, player_id) DO UPDATE SET
               runs = excluded.runs,
               balls_faced = excluded.balls_faced,
               fours = excluded.fours,
               sixes = excluded.sixes,
               is_out = excluded.is_out,
               dismissal_type = excluded.dismissal_type,
               overs = excluded.overs,
               maidens = excluded.maidens,
               runs_conceded = excluded.runs_conceded,
               wickets = excluded.wickets,
               catches = excluded.catches,
               stumps = excluded.stumps,
               run_outs = excluded.run_outs
           RETURNING id"#,
    )
    .bind(match_id)
    .bind(player_id)
    .bind(batting.runs)
    .bind(batting.balls_faced)
    .bind(batting.fours)
    .bind(batting.sixes)
    .bind(batting.is_out)
    .bind(&batting.dismissal_type)
    .bind(bowling.overs)
    .bind(bowling.maidens)
    .bind(bowling.runs_conceded)
    .bind(bowling.wickets)
    .bind(fielding.catches)
    .bind(fielding.stumps)
    .bind(fielding.run_outs)
    .fetch_one(pool)
    .await
}

/// Replace the fantasy point record for one (match, player) pair. Re-scoring
/// overwrites the prior breakdown; it never produces a second row.
pub async fn upsert_fantasy_points(
    pool: &SqlitePool,
    match_id: i64,
    player_id: i64,
    breakdown: &PointBreakdown,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"INSERT INTO fantasy_points
               (match_id, player_id, runs, fours, sixes, thirty_bonus, fifty_bonus, hundred_bonus,
                wickets, maidens, three_wicket_bonus, five_wicket_bonus,
                catches, stumps, run_outs, duck, total_points, created_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
           ON CONFLICT(match_id, player_id) DO UPDATE SET
               runs = excluded.runs,
               fours = excluded.fours,
               sixes = excluded.sixes,
               thirty_bonus = excluded.thirty_bonus,
               fifty_bonus = excluded.fifty_bonus,
               hundred_bonus = excluded.hundred_bonus,
               wickets = excluded.wickets,
               maidens = excluded.maidens,
               three_wicket_bonus = excluded.three_wicket_bonus,
               five_wicket_bonus = excluded.five_wicket_bonus,
               catches = excluded.catches,
               stumps = excluded.stumps,
               run_outs = excluded.run_outs,
               duck = excluded.duck,
               total_points = excluded.total_points,
               created_at = excluded.created_at
           RETURNING id"#,
    )
    .bind(match_id)
    .bind(player_id)
    .bind(breakdown.runs)
    .bind(breakdown.fours)
    .bind(breakdown.sixes)
    .bind(breakdown.thirty_bonus)
    .bind(breakdown.fifty_bonus)
    .bind(breakdown.hundred_bonus)
    .bind(breakdown.wickets)
    .bind(breakdown.maidens)
    .bind(breakdown.three_wicket_bonus)
    .bind(breakdown.five_wicket_bonus)
    .bind(breakdown.catches)
    .bind(breakdown.stumps)
    .bind(breakdown.run_outs)
    .bind(breakdown.duck)
    .bind(breakdown.total())
    .bind(now())
    .fetch_one(pool)
    .await
}

/// Refresh the derived running total on the player row from the sum of that
/// player's fantasy point records.
pub async fn refresh_player_total(pool: &SqlitePool, player_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"UPDATE players
           SET fantasy_points = (
               SELECT COALESCE(SUM(total_points), 0) FROM fantasy_points WHERE player_id = ?
           )
           WHERE id = ?"#,
    )
    .bind(player_id)
    .bind(player_id)
    .execute(pool)
    .await?;
    Ok(())
}

// Read side.

pub async fn get_player_by_external_id(
    pool: &SqlitePool,
    external_id: &str,
) -> Result<Option<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(r#"SELECT * FROM players WHERE external_id = ?"#)
        .bind(external_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_match_by_external_id(
    pool: &SqlitePool,
    external_id: &str,
) -> Result<Option<Match>, sqlx::Error> {
    sqlx::query_as::<_, Match>(r#"SELECT * FROM matches WHERE external_id = ?"#)
        .bind(external_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_team_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(r#"SELECT * FROM teams WHERE name = ?"#)
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub async fn performances_for_match(
    pool: &SqlitePool,
    match_id: i64,
) -> Result<Vec<PlayerPerformance>, sqlx::Error> {
    sqlx::query_as::<_, PlayerPerformance>(
        r#"SELECT * FROM player_performances WHERE match_id = ? ORDER BY id"#,
    )
    .bind(match_id)
    .fetch_all(pool)
    .await
}

/// Fantasy point row joined with the scored player's identity.
#[derive(Debug, sqlx::FromRow)]
pub struct ScoredRow {
    #[sqlx(flatten)]
    pub points: FantasyPointsRow,
    pub player_name: String,
    pub player_role: PlayerRole,
    pub player_nationality: String,
}

/// All fantasy rows of one match, highest total first, ties in insertion order.
pub async fn fantasy_rows_for_match(
    pool: &SqlitePool,
    match_id: i64,
    limit: i64,
) -> Result<Vec<ScoredRow>, sqlx::Error> {
    sqlx::query_as::<_, ScoredRow>(
        r#"SELECT fp.*,
                  p.name AS player_name,
                  p.role AS player_role,
                  p.nationality AS player_nationality
           FROM fantasy_points fp
           JOIN players p ON p.id = fp.player_id
           WHERE fp.match_id = ?
           ORDER BY fp.total_points DESC, fp.id ASC
           LIMIT ?"#,
    )
    .bind(match_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

#[derive(Debug, sqlx::FromRow)]
pub struct OverallRow {
    pub player_id: i64,
    pub player_name: String,
    pub player_role: PlayerRole,
    pub player_nationality: String,
    pub total_points: i64,
    pub matches_played: i64,
    pub average_points: f64,
    pub highest_score: i64,
}

/// Cross-match totals per player, highest sum first.
pub async fn overall_fantasy_rows(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<OverallRow>, sqlx::Error> {
    sqlx::query_as::<_, OverallRow>(
        r#"SELECT fp.player_id,
                  p.name AS player_name,
                  p.role AS player_role,
                  p.nationality AS player_nationality,
                  SUM(fp.total_points) AS total_points,
                  COUNT(*) AS matches_played,
                  AVG(fp.total_points) AS average_points,
                  MAX(fp.total_points) AS highest_score
           FROM fantasy_points fp
           JOIN players p ON p.id = fp.player_id
           GROUP BY fp.player_id
           ORDER BY total_points DESC
           LIMIT ?"#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

#[derive(Debug, sqlx::FromRow)]
pub struct TrendRow {
    #[sqlx(flatten)]
    pub points: FantasyPointsRow,
    pub match_name: String,
    pub match_type: MatchFormat,
    pub scheduled_at: Option<String>,
}

/// Most recent fantasy rows for one player, newest first.
pub async fn trend_rows_for_player(
    pool: &SqlitePool,
    player_id: i64,
    limit: i64,
) -> Result<Vec<TrendRow>, sqlx::Error> {
    sqlx::query_as::<_, TrendRow>(
        r#"SELECT fp.*,
                  m.name AS match_name,
                  m.match_type AS match_type,
                  m.scheduled_at AS scheduled_at
           FROM fantasy_points fp
           JOIN matches m ON m.id = fp.match_id
           WHERE fp.player_id = ?
           ORDER BY fp.id DESC
           LIMIT ?"#,
    )
    .bind(player_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Latest scoring events across all players and matches, newest first.
pub async fn recent_scoring_events(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<ScoringEvent>, sqlx::Error> {
    sqlx::query_as::<_, ScoringEvent>(
        r#"SELECT fp.player_id,
                  p.name AS player_name,
                  fp.match_id,
                  m.name AS match_name,
                  fp.total_points AS points,
                  fp.created_at AS date
           FROM fantasy_points fp
           JOIN players p ON p.id = fp.player_id
           JOIN matches m ON m.id = fp.match_id
           ORDER BY fp.id DESC
           LIMIT ?"#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn count_scored_players(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT COUNT(DISTINCT player_id) FROM fantasy_points"#)
        .fetch_one(pool)
        .await
}

/// Completed matches that still have at least one performance row without a
/// fantasy point record. Input to the scoring backfill.
pub async fn completed_matches_lacking_points(
    pool: &SqlitePool,
) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar(
        r#"SELECT DISTINCT m.id
           FROM matches m
           JOIN player_performances pp ON pp.match_id = m.id
           LEFT JOIN fantasy_points fp
               ON fp.match_id = pp.match_id AND fp.player_id = pp.player_id
           WHERE m.status = ? AND fp.id IS NULL
           ORDER BY m.id"#,
    )
    .bind(MatchStatus::Completed)
    .fetch_all(pool)
    .await
}
