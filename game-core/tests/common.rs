use game_core::{Game, GuessOutcome, WordSource};
use game_types::{GameStats, GameStatus};

/// Creates a test WordSource with a known set of words
pub fn create_test_words() -> WordSource {
    WordSource::from_word_list(
        "crane\nreact\nrobot\nroomy\nhello\nworld\nslate\nstone\nnotes\ndumpy\ncable\nllama\nhouse\nmouse\ntrain\nplane\nwater\nbread\ncream\noxide",
    )
}

/// Creates a game with a specific secret word
pub fn create_game_with_word(word: &str) -> Game {
    Game::new(word.to_string())
}

/// Plays the listed guesses, requiring each to be accepted or to complete the
/// game, and returns the final stats if the game ended.
pub fn play_out(game: &mut Game, guesses: &[&str]) -> Option<GameStats> {
    let words = create_test_words();
    let mut stats = None;
    for guess in guesses {
        match game.submit_guess(guess, &words) {
            GuessOutcome::Accepted { .. } => {}
            GuessOutcome::Completed { stats: s, .. } => stats = Some(s),
            GuessOutcome::Rejected(err) => panic!("guess '{}' rejected: {}", guess, err),
        }
    }
    stats
}

/// Asserts a game's status
pub fn assert_status(game: &Game, expected: GameStatus) {
    assert_eq!(
        game.status(),
        expected,
        "expected status {:?}, got {:?}",
        expected,
        game.status()
    );
}
