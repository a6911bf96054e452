use game_types::{GameStats, Tier};

// Fixed weights for converting a completed attempt into points.
const BASE_SCORE: f64 = 100.0;
const TURNS_MULTIPLIER: f64 = 20.0;
const TIME_PENALTY_PER_SEC: f64 = 0.1;
const INVALID_WORD_PENALTY: f64 = 5.0;
const REUSED_ABSENT_PENALTY: f64 = 10.0;
const REUSED_WRONG_POS_PENALTY: f64 = 5.0;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Convert finalized game stats into a point score.
    ///
    /// Starts from the one-turn maximum and deducts for extra turns, elapsed
    /// whole seconds, and each mistake counter. Rounded half away from zero;
    /// a single game's score may be negative.
    pub fn game_score(stats: &GameStats) -> i32 {
        let mut score = BASE_SCORE;

        score -= f64::from(stats.turns_used - 1) * TURNS_MULTIPLIER;
        score -= (stats.time_to_complete_ms / 1000) as f64 * TIME_PENALTY_PER_SEC;
        score -= f64::from(stats.invalid_word_attempts) * INVALID_WORD_PENALTY;
        score -= f64::from(stats.reused_absent_letters) * REUSED_ABSENT_PENALTY;
        score -= f64::from(stats.reused_wrong_positions) * REUSED_WRONG_POS_PENALTY;

        score.round() as i32
    }

    /// Bounded rank delta for one game. Damping shrinks as the tier rises, so
    /// rank mobility drops off near the top of the ladder.
    pub fn rank_change(game_score: i32, current_tier: Tier) -> i32 {
        let base_change = f64::from(game_score) / 10.0;
        (base_change * Self::tier_multiplier(current_tier)).round() as i32
    }

    fn tier_multiplier(tier: Tier) -> f64 {
        match tier {
            Tier::Bronze => 1.0,
            Tier::Silver => 0.8,
            Tier::Gold => 0.6,
            Tier::Platinum => 0.4,
            Tier::Diamond => 0.2,
        }
    }

    /// Apply a rank delta to a cumulative score. The running total is clamped
    /// at zero even though individual deltas may be negative.
    pub fn apply_rank_change(current_score: i32, delta: i32) -> i32 {
        (current_score + delta).max(0)
    }
}
