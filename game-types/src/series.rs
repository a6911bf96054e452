use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::game::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SeriesStatus {
    Active,
    Completed,
}

impl std::fmt::Display for SeriesStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SeriesStatus::Active => "Active",
            SeriesStatus::Completed => "Completed",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for SeriesStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(SeriesStatus::Active),
            "Completed" => Ok(SeriesStatus::Completed),
            other => Err(format!("unknown series status '{}'", other)),
        }
    }
}

/// One player's result for the series' current shared word.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundOutcome {
    pub won: bool,
    pub turns_used: i32,
}

/// Head-to-head match between two players solving the same secret words.
///
/// The document is the single serialization point for both players: every
/// mutation goes through the store's conditional update, so concurrent round
/// completions cannot drop a win increment.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameSeries {
    pub id: Uuid,
    pub players: [String; 2],
    pub player_names: HashMap<String, String>,
    pub current_game_id: GameId,
    pub current_word: String,
    pub player1: String,
    pub player2: String,
    pub player1_score: i32,
    pub player2_score: i32,
    pub games: Vec<GameId>,
    pub round_results: HashMap<String, RoundOutcome>,
    pub recent_words: Vec<String>,
    pub last_played_at: String, // ISO 8601 string
    pub status: SeriesStatus,
}

impl GameSeries {
    pub fn contains_player(&self, uid: &str) -> bool {
        self.players.iter().any(|p| p == uid)
    }

    pub fn opponent_of(&self, uid: &str) -> Option<&str> {
        match &self.players {
            [a, b] if a == uid => Some(b.as_str()),
            [a, b] if b == uid => Some(a.as_str()),
            _ => None,
        }
    }

    /// Win tally for one of the two players.
    pub fn score_of(&self, uid: &str) -> Option<i32> {
        if self.player1 == uid {
            Some(self.player1_score)
        } else if self.player2 == uid {
            Some(self.player2_score)
        } else {
            None
        }
    }
}
