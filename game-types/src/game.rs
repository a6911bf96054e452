use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub type GameId = Uuid;

/// Number of letters in every secret word and accepted guess.
pub const WORD_LENGTH: usize = 5;

/// Maximum guesses before a game is lost.
pub const MAX_TURNS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::Playing => "Playing",
            GameStatus::Won => "Won",
            GameStatus::Lost => "Lost",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for GameStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Playing" => Ok(GameStatus::Playing),
            "Won" => Ok(GameStatus::Won),
            "Lost" => Ok(GameStatus::Lost),
            other => Err(format!("unknown game status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LetterVerdict {
    Correct, // Green - correct letter in correct position
    Present, // Yellow - correct letter in wrong position
    Absent,  // Gray - letter not in word
}

/// Per-attempt statistics, finalized once when the game leaves Playing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameStats {
    pub turns_used: i32,
    pub time_to_complete_ms: i64,
    pub invalid_word_attempts: i32,
    pub reused_absent_letters: i32,
    pub reused_wrong_positions: i32,
}

/// The durable game document written to the store once an attempt completes.
/// Field names are part of the client contract.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameRecord {
    pub id: GameId,
    pub word: String,
    pub guesses: Vec<String>,
    pub status: GameStatus,
    pub created_at: String, // ISO 8601 string
    pub stats: Option<GameStats>,
    pub series_id: Option<Uuid>,
    pub shared_by: Option<String>,
    pub shared_with: Vec<String>,
}
