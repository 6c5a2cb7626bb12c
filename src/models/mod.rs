use serde::{Deserialize, Serialize};

/// Player role as reported by the data source, normalized to a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum PlayerRole {
    Batsman,
    Bowler,
    AllRounder,
    WicketKeeper,
    Unknown,
}

impl PlayerRole {
    /// Normalize the source's role vocabulary ("batter", "keeper", etc.).
    pub fn from_source(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "batsman" | "batter" => PlayerRole::Batsman,
            "bowler" => PlayerRole::Bowler,
            "all-rounder" | "allrounder" | "all rounder" => PlayerRole::AllRounder,
            "wicket-keeper" | "wicketkeeper" | "keeper" | "wk-batsman" => PlayerRole::WicketKeeper,
            _ => PlayerRole::Unknown,
        }
    }
}

/// Current form rating. Owned by downstream analysis, not by the sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PlayerForm {
    Excellent,
    Good,
    Average,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum MatchFormat {
    Test,
    #[serde(rename = "ODI")]
    #[sqlx(rename = "ODI")]
    Odi,
    T20,
    T10,
}

impl MatchFormat {
    pub fn from_source(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "test" => MatchFormat::Test,
            "odi" => MatchFormat::Odi,
            "t10" => MatchFormat::T10,
            _ => MatchFormat::T20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Live,
    Completed,
    Cancelled,
    Abandoned,
}

/// Ordered substring rules mapping the source's free-form status vocabulary
/// onto the local enum. Evaluated top to bottom; first hit wins, no hit
/// falls back to `Upcoming`.
const STATUS_RULES: &[(&str, MatchStatus)] = &[
    ("live", MatchStatus::Live),
    ("progress", MatchStatus::Live),
    ("complete", MatchStatus::Completed),
    ("finished", MatchStatus::Completed),
    ("result", MatchStatus::Completed),
    ("cancel", MatchStatus::Cancelled),
    ("abandon", MatchStatus::Abandoned),
];

impl MatchStatus {
    pub fn from_source(raw: &str) -> Self {
        let status = raw.to_lowercase();
        for (needle, mapped) in STATUS_RULES {
            if status.contains(needle) {
                return *mapped;
            }
        }
        MatchStatus::Upcoming
    }
}

/// Country reference row, keyed by the source's id.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: i64,
    pub external_id: String,
    pub name: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: i64,
    pub external_id: String,
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub odi: i64,
    pub t20: i64,
    pub test: i64,
    pub squads: i64,
    pub matches: i64,
    pub updated_at: String,
}

/// Team row. Teams are mostly created implicitly while syncing players and
/// matches, from nothing more than a country or team name.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub external_id: Option<String>,
    pub name: String,
    pub short_name: String,
    pub country: String,
    pub logo: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub external_id: Option<String>,
    /// Lowercased, whitespace-collapsed name. Upsert key for source records
    /// that arrive without an external id.
    pub fallback_key: String,
    pub name: String,
    pub country: Option<String>,
    pub nationality: String,
    pub role: PlayerRole,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub team_id: Option<i64>,
    pub form: PlayerForm,
    pub is_injured: bool,
    pub matches: i64,
    pub runs: i64,
    pub wickets: i64,
    pub catches: i64,
    pub stumps: i64,
    pub run_outs: i64,
    /// Running total across all scored matches. Derived; refreshed by the
    /// scoring engine, never written directly.
    pub fantasy_points: i64,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i64,
    pub external_id: String,
    pub name: String,
    pub match_type: MatchFormat,
    pub status: MatchStatus,
    pub scheduled_at: Option<String>,
    pub team1_id: i64,
    pub team2_id: i64,
    pub venue: Option<String>,
    pub winner_team_id: Option<i64>,
    pub team1_score: Option<String>,
    pub team2_score: Option<String>,
    pub updated_at: String,
}

/// Batting line of a single (match, player) performance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BattingLine {
    pub runs: i64,
    pub balls_faced: i64,
    pub fours: i64,
    pub sixes: i64,
    pub is_out: bool,
    pub dismissal_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BowlingLine {
    pub overs: f64,
    pub maidens: i64,
    pub runs_conceded: i64,
    pub wickets: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FieldingLine {
    pub catches: i64,
    pub stumps: i64,
    pub run_outs: i64,
}

/// Raw per-match player statistics, the input to scoring. One row per
/// (match, player) pair.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPerformance {
    pub id: i64,
    pub match_id: i64,
    pub player_id: i64,
    #[sqlx(flatten)]
    pub batting: BattingLine,
    #[sqlx(flatten)]
    pub bowling: BowlingLine,
    #[sqlx(flatten)]
    pub fielding: FieldingLine,
}

/// Itemized fantasy point record, the output of scoring. One row per
/// (match, player) pair; `total_points` is always the sum of the breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FantasyPointsRow {
    pub id: i64,
    pub match_id: i64,
    pub player_id: i64,
    pub runs: i64,
    pub fours: i64,
    pub sixes: i64,
    pub thirty_bonus: i64,
    pub fifty_bonus: i64,
    pub hundred_bonus: i64,
    pub wickets: i64,
    pub maidens: i64,
    pub three_wicket_bonus: i64,
    pub five_wicket_bonus: i64,
    pub catches: i64,
    pub stumps: i64,
    pub run_outs: i64,
    pub duck: i64,
    pub total_points: i64,
    pub created_at: String,
}

impl FantasyPointsRow {
    pub fn batting_points(&self) -> i64 {
        self.runs + self.fours + self.sixes + self.thirty_bonus + self.fifty_bonus + self.hundred_bonus
    }

    pub fn bowling_points(&self) -> i64 {
        self.wickets + self.maidens + self.three_wicket_bonus + self.five_wicket_bonus
    }

    pub fn fielding_points(&self) -> i64 {
        self.catches + self.stumps + self.run_outs
    }

    pub fn penalty_points(&self) -> i64 {
        self.duck
    }
}

/// Per-category sub-totals recomputed from a breakdown for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub batting: i64,
    pub bowling: i64,
    pub fielding: i64,
    pub penalty: i64,
}

impl From<&FantasyPointsRow> for CategoryBreakdown {
    fn from(row: &FantasyPointsRow) -> Self {
        CategoryBreakdown {
            batting: row.batting_points(),
            bowling: row.bowling_points(),
            fielding: row.fielding_points(),
            penalty: row.penalty_points(),
        }
    }
}

/// One entry of a single-match leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchLeaderboardEntry {
    pub rank: i64,
    pub player_id: i64,
    pub player_name: String,
    pub role: PlayerRole,
    pub nationality: String,
    pub points: i64,
    pub breakdown: CategoryBreakdown,
}

/// One entry of the cross-match leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallLeaderboardEntry {
    pub rank: i64,
    pub player_id: i64,
    pub player_name: String,
    pub role: PlayerRole,
    pub nationality: String,
    pub total_points: i64,
    pub matches_played: i64,
    pub average_points: f64,
    pub highest_score: i64,
}

/// One point of a player's recent-form trend, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub match_id: i64,
    pub match_name: String,
    pub match_type: MatchFormat,
    pub scheduled_at: Option<String>,
    pub points: i64,
    pub breakdown: CategoryBreakdown,
    pub date: String,
}

/// A recent scoring event for the dashboard feed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ScoringEvent {
    pub player_id: i64,
    pub player_name: String,
    pub match_id: i64,
    pub match_name: String,
    pub points: i64,
    pub date: String,
}

///// Composite dashboard view: top performers, latest scoring events and the
/// number of distinct players scored so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FantasySummary {
    pub top_performers: Vec<OverallLeaderboardEntry>,
    pub recent_events: Vec<ScoringEvent>,
    pub total_players: i64,
    pub last_updated: String,
}
