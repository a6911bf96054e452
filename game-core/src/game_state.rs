use chrono::{DateTime, Utc};
use game_types::{
    GameId, GameRecord, GameStats, GameStatus, GuessError, LetterVerdict, MAX_TURNS, WORD_LENGTH,
};
use uuid::Uuid;

use crate::evaluator::{self, GuessRow, KeyboardState};
use crate::words::WordSource;

/// What a single `submit_guess` call produced. A rejection leaves the guess
/// history untouched; `Completed` is returned exactly once per game, on the
/// transition out of `Playing`.
#[derive(Debug, Clone)]
pub enum GuessOutcome {
    Rejected(GuessError),
    Accepted {
        verdicts: Vec<LetterVerdict>,
    },
    Completed {
        verdicts: Vec<LetterVerdict>,
        record: GameRecord,
        stats: GameStats,
    },
}

/// One puzzle attempt: the secret, the accepted guesses with their verdicts,
/// and the mistake counters accumulated along the way. Performs no I/O; all
/// effects are observable through the returned `GuessOutcome`.
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    secret: String,
    history: Vec<GuessRow>,
    status: GameStatus,
    created_at: DateTime<Utc>,
    invalid_word_attempts: i32,
    reused_absent_letters: i32,
    reused_wrong_positions: i32,
    stats: Option<GameStats>,
    series_id: Option<Uuid>,
    shared_by: Option<String>,
    shared_with: Vec<String>,
}

impl Game {
    pub fn new(secret: String) -> Self {
        Self::with_origin(secret, None, None)
    }

    /// Start an attempt on a secret received from someone else: a shared game
    /// or the current word of a series.
    pub fn with_origin(secret: String, series_id: Option<Uuid>, shared_by: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            secret: evaluator::normalize(&secret),
            history: Vec::new(),
            status: GameStatus::Playing,
            created_at: Utc::now(),
            invalid_word_attempts: 0,
            reused_absent_letters: 0,
            reused_wrong_positions: 0,
            stats: None,
            series_id,
            shared_by,
            shared_with: Vec::new(),
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn history(&self) -> &[GuessRow] {
        &self.history
    }

    pub fn turns_used(&self) -> usize {
        self.history.len()
    }

    pub fn series_id(&self) -> Option<Uuid> {
        self.series_id
    }

    pub fn keyboard_state(&self) -> KeyboardState {
        KeyboardState::from_history(&self.history)
    }

    pub fn mark_shared_with(&mut self, contact: String) {
        if !self.shared_with.contains(&contact) {
            self.shared_with.push(contact);
        }
    }

    /// Apply one guess. Status only ever moves `Playing -> Won | Lost`; once
    /// terminal every further submission is rejected.
    pub fn submit_guess(&mut self, raw_guess: &str, words: &WordSource) -> GuessOutcome {
        if self.status.is_terminal() {
            return GuessOutcome::Rejected(GuessError::GameOver);
        }

        let guess = evaluator::normalize(raw_guess);
        let length = guess.chars().count();
        if length != WORD_LENGTH {
            return GuessOutcome::Rejected(GuessError::InvalidLength { length });
        }

        if !words.is_valid(&guess) {
            self.invalid_word_attempts += 1;
            return GuessOutcome::Rejected(GuessError::NotAWord { word: guess });
        }

        // Mistake counters compare the guess against everything revealed so far
        let reuse = evaluator::count_reuse(&self.history, &guess);
        self.reused_absent_letters += reuse.absent_letters;
        self.reused_wrong_positions += reuse.wrong_positions;

        let verdicts = evaluator::evaluate(&self.secret, &guess);
        let solved = guess == self.secret;
        self.history.push(GuessRow {
            word: guess,
            verdicts: verdicts.clone(),
        });

        if solved {
            self.status = GameStatus::Won;
        } else if self.history.len() >= MAX_TURNS {
            self.status = GameStatus::Lost;
        }

        if self.status.is_terminal() {
            let stats = self.finalize();
            GuessOutcome::Completed {
                verdicts,
                record: self.to_record(),
                stats,
            }
        } else {
            GuessOutcome::Accepted { verdicts }
        }
    }

    fn finalize(&mut self) -> GameStats {
        let stats = GameStats {
            turns_used: self.history.len() as i32,
            time_to_complete_ms: (Utc::now() - self.created_at).num_milliseconds().max(0),
            invalid_word_attempts: self.invalid_word_attempts,
            reused_absent_letters: self.reused_absent_letters,
            reused_wrong_positions: self.reused_wrong_positions,
        };
        self.stats = Some(stats);
        stats
    }

    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            id: self.id,
            word: self.secret.clone(),
            guesses: self.history.iter().map(|row| row.word.clone()).collect(),
            status: self.status,
            created_at: self.created_at.to_rfc3339(),
            stats: self.stats,
            series_id: self.series_id,
            shared_by: self.shared_by.clone(),
            shared_with: self.shared_with.clone(),
        }
    }
}
