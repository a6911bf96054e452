mod common;

use common::*;
use game_core::{ScoringEngine, classify, evaluate};
use game_types::{GameStatus, LetterVerdict, Tier};

#[test]
fn test_full_winning_game() {
    let mut game = create_game_with_word("crane");
    let stats = play_out(&mut game, &["slate", "react", "crane"]);

    assert_status(&game, GameStatus::Won);
    let stats = stats.expect("game should have completed");
    assert_eq!(stats.turns_used, 3);
    assert_eq!(stats.invalid_word_attempts, 0);
}

#[test]
fn test_full_losing_game_reports_six_turns() {
    let mut game = create_game_with_word("crane");
    let stats = play_out(
        &mut game,
        &["hello", "world", "slate", "stone", "mouse", "house"],
    );

    assert_status(&game, GameStatus::Lost);
    assert_eq!(stats.expect("game should have completed").turns_used, 6);
}

#[test]
fn test_verdict_history_matches_evaluator() {
    let mut game = create_game_with_word("robot");
    play_out(&mut game, &["roomy"]);

    assert_eq!(game.history().len(), 1);
    assert_eq!(game.history()[0].verdicts, evaluate("robot", "roomy"));
}

#[test]
fn test_keyboard_correct_survives_later_guesses() {
    let mut game = create_game_with_word("crane");
    play_out(&mut game, &["cable"]);
    assert_eq!(
        game.keyboard_state().verdict_for('c'),
        Some(LetterVerdict::Correct)
    );

    // c is absent from later guesses but must stay Correct
    play_out(&mut game, &["hello", "world"]);
    assert_eq!(
        game.keyboard_state().verdict_for('c'),
        Some(LetterVerdict::Correct)
    );
}

#[test]
fn test_completed_game_scores_and_classifies() {
    let mut game = create_game_with_word("crane");
    let stats = play_out(&mut game, &["crane"]).expect("one-guess win");

    let game_score = ScoringEngine::game_score(&stats);
    assert!(game_score <= 100);
    assert!(game_score > 90, "instant solve should stay near the base");

    let delta = ScoringEngine::rank_change(game_score, Tier::Bronze);
    let total = ScoringEngine::apply_rank_change(0, delta);
    assert_eq!(classify(total), Tier::Bronze);
}

#[test]
fn test_mistake_counters_feed_scoring() {
    let mut clean = create_game_with_word("crane");
    let clean_stats = play_out(&mut clean, &["slate", "crane"]).unwrap();

    let mut sloppy = create_game_with_word("crane");
    // dumpy reveals nothing; mouse then reuses known-absent u and m
    let sloppy_stats = play_out(&mut sloppy, &["dumpy", "mouse", "crane"]).unwrap();

    assert!(sloppy_stats.reused_absent_letters > 0);
    assert!(
        ScoringEngine::game_score(&sloppy_stats) < ScoringEngine::game_score(&clean_stats),
        "extra turn plus reused letters must cost points"
    );
}
