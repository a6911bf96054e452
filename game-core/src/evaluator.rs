use std::collections::HashMap;

use game_types::LetterVerdict;

/// Lowercase + trim, the normal form every comparison runs on.
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Classify every position of `guess` against `secret`.
///
/// Two passes: exact positional matches first, then a left-to-right scan that
/// consumes the remaining letter counts for `Present` marks. A letter that
/// appears more often in the guess than in the secret only gets as many
/// `Correct`/`Present` marks as the secret actually holds, and earlier
/// occurrences win the tie.
pub fn evaluate(secret: &str, guess: &str) -> Vec<LetterVerdict> {
    let secret_chars: Vec<char> = normalize(secret).chars().collect();
    let guess_chars: Vec<char> = normalize(guess).chars().collect();

    let mut verdicts = vec![LetterVerdict::Absent; guess_chars.len()];

    // First pass: mark correct positions, count the unmatched secret letters
    let mut remaining: HashMap<char, usize> = HashMap::new();
    for (i, &s) in secret_chars.iter().enumerate() {
        if guess_chars.get(i) == Some(&s) {
            verdicts[i] = LetterVerdict::Correct;
        } else {
            *remaining.entry(s).or_insert(0) += 1;
        }
    }

    // Second pass: spend the remaining counts on present letters
    for (i, &g) in guess_chars.iter().enumerate() {
        if verdicts[i] == LetterVerdict::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(&g)
            && *count > 0
        {
            verdicts[i] = LetterVerdict::Present;
            *count -= 1;
        }
    }

    verdicts
}

/// One submitted guess and its verdicts, as kept in a game's history.
#[derive(Debug, Clone)]
pub struct GuessRow {
    pub word: String,
    pub verdicts: Vec<LetterVerdict>,
}

/// Best verdict observed per letter across all guesses so far.
///
/// Precedence is `Correct > Present > Absent`; a letter never regresses once a
/// stronger verdict has been seen.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    letters: HashMap<char, LetterVerdict>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_history(history: &[GuessRow]) -> Self {
        let mut state = Self::new();
        for row in history {
            state.absorb(&row.word, &row.verdicts);
        }
        state
    }

    pub fn absorb(&mut self, guess: &str, verdicts: &[LetterVerdict]) {
        for (ch, &verdict) in normalize(guess).chars().zip(verdicts) {
            match self.letters.get(&ch) {
                Some(&prev) if Self::rank(prev) >= Self::rank(verdict) => {}
                _ => {
                    self.letters.insert(ch, verdict);
                }
            }
        }
    }

    pub fn verdict_for(&self, letter: char) -> Option<LetterVerdict> {
        self.letters
            .get(&letter.to_ascii_lowercase())
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    fn rank(verdict: LetterVerdict) -> u8 {
        match verdict {
            LetterVerdict::Correct => 2,
            LetterVerdict::Present => 1,
            LetterVerdict::Absent => 0,
        }
    }
}

/// Mistake counts for a prospective guess, measured against what earlier
/// guesses already revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReuseCounts {
    pub absent_letters: i32,
    pub wrong_positions: i32,
}

/// Count reused information in `guess`: letters the player already knows are
/// absent, and letters repeated at a position where they were already marked
/// `Present`.
pub fn count_reuse(history: &[GuessRow], guess: &str) -> ReuseCounts {
    let keyboard = KeyboardState::from_history(history);
    let guess = normalize(guess);

    let mut absent_letters = 0;
    let mut wrong_positions = 0;

    for (i, ch) in guess.chars().enumerate() {
        if keyboard.verdict_for(ch) == Some(LetterVerdict::Absent) {
            absent_letters += 1;
        }
        let repeats_known_wrong_spot = history.iter().any(|row| {
            row.verdicts.get(i) == Some(&LetterVerdict::Present)
                && row.word.chars().nth(i) == Some(ch)
        });
        if repeats_known_wrong_spot {
            wrong_positions += 1;
        }
    }

    ReuseCounts {
        absent_letters,
        wrong_positions,
    }
}
