use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Why a submitted guess was rejected. Rejections never change the guess
/// history; `NotAWord` still counts against the attempt's mistake stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GuessError {
    InvalidLength { length: usize },
    NotAWord { word: String },
    GameOver,
}

impl std::fmt::Display for GuessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuessError::InvalidLength { length } => {
                write!(f, "guess must be 5 letters, got {}", length)
            }
            GuessError::NotAWord { word } => write!(f, "'{}' is not a valid word", word),
            GuessError::GameOver => write!(f, "game is already over"),
        }
    }
}

impl std::error::Error for GuessError {}
