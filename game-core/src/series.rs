use std::collections::HashMap;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use game_types::{GameId, GameSeries, RoundOutcome, SeriesStatus};
use uuid::Uuid;

use crate::words::WordSource;

/// How many finished words a series keeps around to avoid handing a player a
/// word they just solved.
const RECENT_WORDS_KEPT: usize = 20;

/// Open a fresh head-to-head series on `first_word`.
pub fn new_series(
    player1: (&str, &str),
    player2: (&str, &str),
    first_word: String,
    now: DateTime<Utc>,
) -> GameSeries {
    let (uid1, name1) = player1;
    let (uid2, name2) = player2;

    let mut player_names = HashMap::new();
    player_names.insert(uid1.to_string(), name1.to_string());
    player_names.insert(uid2.to_string(), name2.to_string());

    GameSeries {
        id: Uuid::new_v4(),
        players: [uid1.to_string(), uid2.to_string()],
        player_names,
        current_game_id: Uuid::new_v4(),
        current_word: first_word.to_lowercase(),
        player1: uid1.to_string(),
        player2: uid2.to_string(),
        player1_score: 0,
        player2_score: 0,
        games: Vec::new(),
        round_results: HashMap::new(),
        recent_words: Vec::new(),
        last_played_at: now.to_rfc3339(),
        status: SeriesStatus::Active,
    }
}

/// Judge a finished round once both outcomes are in. A solver beats a
/// non-solver; two solvers are split by turn count; ties and double losses
/// award nobody.
pub fn round_winner(series: &GameSeries) -> Option<String> {
    let p1 = series.round_results.get(&series.player1)?;
    let p2 = series.round_results.get(&series.player2)?;

    match (p1.won, p2.won) {
        (true, false) => Some(series.player1.clone()),
        (false, true) => Some(series.player2.clone()),
        (false, false) => None,
        (true, true) => {
            if p1.turns_used < p2.turns_used {
                Some(series.player1.clone())
            } else if p2.turns_used < p1.turns_used {
                Some(series.player2.clone())
            } else {
                None
            }
        }
    }
}

/// Record `uid`'s result for the series' current shared word.
///
/// When the second player reports, the round is judged, the winner's tally
/// bumped, the finished game archived, and the next shared word drawn
/// (avoiding recent words, best effort). Returns the id of the newly opened
/// shared game when the series advanced.
///
/// This mutation is written to run inside the store's conditional update, so
/// two players completing concurrently cannot double-count a round.
pub fn apply_round_result(
    series: &mut GameSeries,
    uid: &str,
    outcome: RoundOutcome,
    words: &WordSource,
    word_retries: usize,
    now: DateTime<Utc>,
) -> Result<Option<GameId>> {
    if !series.contains_player(uid) {
        bail!("player {} is not part of series {}", uid, series.id);
    }
    if series.status != SeriesStatus::Active {
        bail!("series {} is no longer active", series.id);
    }

    series.round_results.insert(uid.to_string(), outcome);
    series.last_played_at = now.to_rfc3339();

    if series.round_results.len() < 2 {
        return Ok(None);
    }

    if let Some(winner) = round_winner(series) {
        if winner == series.player1 {
            series.player1_score += 1;
        } else {
            series.player2_score += 1;
        }
    }

    series.games.push(series.current_game_id);
    series.recent_words.push(series.current_word.clone());
    if series.recent_words.len() > RECENT_WORDS_KEPT {
        let overflow = series.recent_words.len() - RECENT_WORDS_KEPT;
        series.recent_words.drain(..overflow);
    }

    series.round_results.clear();
    series.current_word = words.next_word_excluding(&series.recent_words, word_retries)?;
    series.current_game_id = Uuid::new_v4();

    Ok(Some(series.current_game_id))
}
