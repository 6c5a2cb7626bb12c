//! Fantasy scoring: a fixed rule table turning one player's raw match
//! statistics into an itemized point breakdown, plus the persistence
//! operations that keep `fantasy_points` rows in step with performances.

use sqlx::sqlite::SqlitePool;

use crate::db;
use crate::models::{BattingLine, BowlingLine, FieldingLine, PlayerPerformance};

// Rule table. Values per scoring event, bonuses per innings.
const RUN: i64 = 1;
const FOUR: i64 = 2;
const SIX: i64 = 4;
const THIRTY_BONUS: i64 = 10;
const FIFTY_BONUS: i64 = 20;
const HUNDRED_BONUS: i64 = 40;
const WICKET: i64 = 25;
const MAIDEN: i64 = 5;
const THREE_WICKET_BONUS: i64 = 10;
const FIVE_WICKET_BONUS: i64 = 20;
const CATCH: i64 = 10;
const STUMPING: i64 = 12;
const RUN_OUT: i64 = 12;
const DUCK: i64 = -5;

/// Itemized point contributions for one (match, player) performance. Every
/// field already holds points, not raw counts; the total is always the sum
/// of the fields and can be negative (a duck with no other contribution).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointBreakdown {
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
}

/// Malformed counters (negative runs and the like) are clamped to zero so a
/// single corrupt performance row cannot poison a whole match's scoring.
fn clamped(value: i64) -> i64 {
    value.max(0)
}

impl PointBreakdown {
    /// Compute the breakdown for one performance. Pure and deterministic.
    ///
    /// The run-threshold bonuses are mutually exclusive: only the highest
    /// threshold met is awarded. Same for the wicket bonuses. The duck
    /// penalty applies only to a batter recorded out for zero after facing
    /// at least one ball; whether a retired-hurt zero counts as out is left
    /// to the ingestion path that sets `is_out`.
    pub fn compute(
        batting: &BattingLine,
        bowling: &BowlingLine,
        fielding: &FieldingLine,
    ) -> Self {
        let mut points = PointBreakdown::default();

        let runs = clamped(batting.runs);
        points.runs = runs * RUN;
        points.fours = clamped(batting.fours) * FOUR;
        points.sixes = clamped(batting.sixes) * SIX;

        if runs >= 100 {
            points.hundred_bonus = HUNDRED_BONUS;
        } else if runs >= 50 {
            points.fifty_bonus = FIFTY_BONUS;
        } else if runs >= 30 {
            points.thirty_bonus = THIRTY_BONUS;
        }

        if runs == 0 && clamped(batting.balls_faced) > 0 && batting.is_out {
            points.duck = DUCK;
        }

        let wickets = clamped(bowling.wickets);
        points.wickets = wickets * WICKET;
        points.maidens = clamped(bowling.maidens) * MAIDEN;

        if wickets >= 5 {
            points.five_wicket_bonus = FIVE_WICKET_BONUS;
        } else if wickets >= 3 {
            points.three_wicket_bonus = THREE_WICKET_BONUS;
        }

        points.catches = clamped(fielding.catches) * CATCH;
        points.stumps = clamped(fielding.stumps) * STUMPING;
        points.run_outs = clamped(fielding.run_outs) * RUN_OUT;

        points
    }

    /// Arithmetic sum of every field, penalties included.
    pub fn total(&self) -> i64 {
        self.runs
            + self.fours
            + self.sixes
            + self.thirty_bonus
            + self.fifty_bonus
            + self.hundred_bonus
            + self.wickets
            + self.maidens
            + self.three_wicket_bonus
            + self.five_wicket_bonus
            + self.catches
            + self.stumps
            + self.run_outs
            + self.duck
    }
}

/// Score one performance and persist the result, replacing any prior record
/// for the same (match, player) pair. Returns the total.
pub async fn score_performance(
    pool: &SqlitePool,
    performance: &PlayerPerformance,
) -> Result<i64, sqlx::Error> {
    let breakdown = PointBreakdown::compute(
        &performance.batting,
        &performance.bowling,
        &performance.fielding,
    );
    db::upsert_fantasy_points(pool, performance.match_id, performance.player_id, &breakdown)
        .await?;
    db::refresh_player_total(pool, performance.player_id).await?;
    Ok(breakdown.total())
}

/// Score every recorded performance of one match. A failure on one row is
/// logged and skipped; the rest of the match is still scored. Returns the
/// number of players scored.
pub async fn score_match(pool: &SqlitePool, match_id: i64) -> Result<usize, sqlx::Error> {
    let performances = db::performances_for_match(pool, match_id).await?;
    let mut scored = 0;

    for performance in &performances {
        match score_performance(pool, performance).await {
            Ok(total) => {
                scored += 1;
                tracing::debug!(
                    match_id,
                    player_id = performance.player_id,
                    total,
                    "scored performance"
                );
            }
            Err(err) => {
                tracing::warn!(
                    match_id,
                    player_id = performance.player_id,
                    error = %err,
                    "failed to score performance, skipping"
                );
            }
        }
    }

    tracing::info!(match_id, scored, "fantasy points calculated");
    Ok(scored)
}

/// Backfill scoring for completed matches that have performances but no
/// fantasy point records yet. Safe to run repeatedly; already-scored matches
/// are not picked up again.
pub async fn score_all_completed_matches(pool: &SqlitePool) -> Result<usize, sqlx::Error> {
    let match_ids = db::completed_matches_lacking_points(pool).await?;
    let mut matches_scored = 0;

    for match_id in match_ids {
        match score_match(pool, match_id).await {
            Ok(_) => matches_scored += 1,
            Err(err) => {
                tracing::warn!(match_id, error = %err, "failed to score completed match");
            }
        }
    }

    if matches_scored > 0 {
        tracing::info!(matches_scored, "backfilled fantasy points for completed matches");
    }
    Ok(matches_scored)
}

#[cfg(test)]
mod tests {
    use super::*;

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
            wickets,
            maidens,
            ..Default::default()
        }
    }

    fn fielding(catches: i64, stumps: i64, run_outs: i64) -> FieldingLine {
        FieldingLine {
            catches,
            stumps,
            run_outs,
        }
    }

    #[test]
    fn scoring_is_deterministic() {
        let bat = batting(42, 30, 4, 1, true);
        let bowl = bowling(2, 1);
        let field = fielding(1, 0, 1);

        let first = PointBreakdown::compute(&bat, &bowl, &field);
        let second = PointBreakdown::compute(&bat, &bowl, &field);
        assert_eq!(first, second);
    }

    #[test]
    fn run_threshold_bonuses_are_mutually_exclusive() {
        let century = PointBreakdown::compute(
            &batting(100, 60, 0, 0, false),
            &BowlingLine::default(),
            &FieldingLine::default(),
        );
        assert_eq!(century.hundred_bonus, 40);
        assert_eq!(century.fifty_bonus, 0);
        assert_eq!(century.thirty_bonus, 0);

        let fifty = PointBreakdown::compute(
            &batting(50, 40, 0, 0, false),
            &BowlingLine::default(),
            &FieldingLine::default(),
        );
        assert_eq!(fifty.fifty_bonus, 20);
        assert_eq!(fifty.thirty_bonus, 0);

        let forty_nine = PointBreakdown::compute(
            &batting(49, 40, 0, 0, false),
            &BowlingLine::default(),
            &FieldingLine::default(),
        );
        assert_eq!(forty_nine.fifty_bonus, 0);
        assert_eq!(forty_nine.thirty_bonus, 10);

        let thirty = PointBreakdown::compute(
            &batting(30, 25, 0, 0, false),
            &BowlingLine::default(),
            &FieldingLine::default(),
        );
        assert_eq!(thirty.thirty_bonus, 10);

        let twenty_nine = PointBreakdown::compute(
            &batting(29, 25, 0, 0, false),
            &BowlingLine::default(),
            &FieldingLine::default(),
        );
        assert_eq!(twenty_nine.thirty_bonus, 0);
    }

    #[test]
    fn wicket_bonuses_are_mutually_exclusive() {
        let five_for = PointBreakdown::compute(
            &BattingLine::default(),
            &bowling(5, 0),
            &FieldingLine::default(),
        );
        assert_eq!(five_for.five_wicket_bonus, 20);
        assert_eq!(five_for.three_wicket_bonus, 0);
        assert_eq!(five_for.wickets, 125);

        let three_for = PointBreakdown::compute(
            &BattingLine::default(),
            &bowling(3, 0),
            &FieldingLine::default(),
        );
        assert_eq!(three_for.three_wicket_bonus, 10);
        assert_eq!(three_for.five_wicket_bonus, 0);

        let two_for = PointBreakdown::compute(
            &BattingLine::default(),
            &bowling(2, 0),
            &FieldingLine::default(),
        );
        assert_eq!(two_for.three_wicket_bonus, 0);
    }

    #[test]
    fn duck_requires_dismissal_and_a_ball_faced() {
        let out_for_nought = PointBreakdown::compute(
            &batting(0, 3, 0, 0, true),
            &BowlingLine::default(),
            &FieldingLine::default(),
        );
        assert_eq!(out_for_nought.duck, -5);
        assert_eq!(out_for_nought.total(), -5);

        let not_out_nought = PointBreakdown::compute(
            &batting(0, 3, 0, 0, false),
            &BowlingLine::default(),
            &FieldingLine::default(),
        );
        assert_eq!(not_out_nought.duck, 0);
        assert_eq!(not_out_nought.total(), 0);

        let did_not_bat = PointBreakdown::compute(
            &batting(0, 0, 0, 0, false),
            &BowlingLine::default(),
            &FieldingLine::default(),
        );
        assert_eq!(did_not_bat.duck, 0);
        assert_eq!(did_not_bat.total(), 0);
    }

    #[test]
    fn fifty_five_with_boundaries_and_a_catch_totals_101() {
        let breakdown = PointBreakdown::compute(
            &batting(55, 40, 6, 1, true),
            &bowling(0, 0),
            &fielding(1, 0, 0),
        );

        // 55 runs + 12 (fours) + 4 (six) + 20 (fifty bonus) = 91 batting
        assert_eq!(
            breakdown.runs + breakdown.fours + breakdown.sixes + breakdown.fifty_bonus,
            91
        );
        assert_eq!(breakdown.catches, 10);
        assert_eq!(breakdown.total(), 101);
    }

    #[test]
    fn total_is_sum_of_breakdown_fields() {
        let breakdown = PointBreakdown::compute(
            &batting(0, 2, 0, 0, true),
            &bowling(3, 2),
            &fielding(1, 1, 1),
        );
        let sum = breakdown.runs
            + breakdown.fours
            + breakdown.sixes
            + breakdown.thirty_bonus
            + breakdown.fifty_bonus
            + breakdown.hundred_bonus
            + breakdown.wickets
            + breakdown.maidens
            + breakdown.three_wicket_bonus
            + breakdown.five_wicket_bonus
            + breakdown.catches
            + breakdown.stumps
            + breakdown.run_outs
            + breakdown.duck;
        assert_eq!(breakdown.total(), sum);
    }

    #[test]
    fn negative_inputs_are_clamped() {
        let breakdown = PointBreakdown::compute(
            &batting(-10, -2, -1, -1, true),
            &bowling(-3, -1),
            &fielding(-1, -1, -1),
        );
        assert_eq!(breakdown, PointBreakdown::default());
        assert_eq!(breakdown.total(), 0);
    }
}
