use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Optional path to a word list; the embedded list is used when unset.
    pub words_file: Option<String>,
    pub leaderboard_size: u64,
    pub nearby_window: u64,
    pub series_word_retries: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            words_file: env::var("WORDS_FILE").ok(),
            leaderboard_size: env::var("LEADERBOARD_SIZE")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("Invalid LEADERBOARD_SIZE"),
            nearby_window: env::var("NEARBY_WINDOW")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .expect("Invalid NEARBY_WINDOW"),
            series_word_retries: env::var("SERIES_WORD_RETRIES")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("Invalid SERIES_WORD_RETRIES"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
