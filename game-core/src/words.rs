use std::collections::HashSet;

use anyhow::{Result, anyhow};
use rand::Rng;

use game_types::WORD_LENGTH;

const EMBEDDED_WORDS: &str = include_str!("../words.txt");

/// The dictionary: validates submitted guesses and supplies secret words.
pub struct WordSource {
    words: Vec<String>,
    index: HashSet<String>,
}

impl WordSource {
    /// Parse a newline-separated word list. Blank lines and `#` comments are
    /// skipped; entries are lowercased and anything that is not exactly five
    /// ASCII letters is dropped.
    pub fn from_word_list(word_list: &str) -> Self {
        let words: Vec<String> = word_list
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .map(|word| word.trim().to_lowercase())
            .filter(|word| {
                word.chars().count() == WORD_LENGTH
                    && word.chars().all(|c| c.is_ascii_alphabetic())
            })
            .collect();
        let index = words.iter().cloned().collect();

        Self { words, index }
    }

    /// The word list compiled into the binary.
    pub fn embedded() -> Self {
        Self::from_word_list(EMBEDDED_WORDS)
    }

    pub fn is_valid(&self, word: &str) -> bool {
        self.index.contains(&word.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn random_word(&self) -> Result<String> {
        if self.words.is_empty() {
            return Err(anyhow!("word list is empty"));
        }
        let index = rand::rng().random_range(0..self.words.len());
        Ok(self.words[index].clone())
    }

    /// Pick the next shared word for a series, avoiding `exclude`. Best
    /// effort: after `retries` collisions a repeat is allowed rather than
    /// failing the series.
    pub fn next_word_excluding(&self, exclude: &[String], retries: usize) -> Result<String> {
        let mut word = self.random_word()?;
        for _ in 0..retries {
            if !exclude.iter().any(|used| used.eq_ignore_ascii_case(&word)) {
                break;
            }
            word = self.random_word()?;
        }
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_list_parsing() {
        let source = WordSource::from_word_list(
            "crane\nCRANE\n# comment\n\nhello\nab\ntoolong\nh3llo\n  slate  ",
        );

        assert!(source.is_valid("crane"));
        assert!(source.is_valid("HELLO"));
        assert!(source.is_valid("slate"));
        assert!(!source.is_valid("toolong"));
        assert!(!source.is_valid("h3llo"));
        assert!(!source.is_valid("ab"));
    }

    #[test]
    fn test_empty_list_yields_no_word() {
        let source = WordSource::from_word_list("");
        assert!(source.is_empty());
        assert!(source.random_word().is_err());
    }

    #[test]
    fn test_random_word_is_always_valid() {
        let source = WordSource::from_word_list("crane\nhello\nworld\nslate\nstone");
        for _ in 0..20 {
            let word = source.random_word().unwrap();
            assert!(source.is_valid(&word));
        }
    }

    #[test]
    fn test_exclusion_finds_fresh_word() {
        let source = WordSource::from_word_list("crane\nhello");
        let exclude = vec!["crane".to_string()];
        // with enough retries the un-excluded word always turns up
        for _ in 0..20 {
            let word = source.next_word_excluding(&exclude, 64).unwrap();
            assert_eq!(word, "hello");
        }
    }

    #[test]
    fn test_exclusion_falls_back_to_repeat() {
        let source = WordSource::from_word_list("crane");
        let exclude = vec!["crane".to_string()];
        // everything is excluded, so the repeat is allowed
        let word = source.next_word_excluding(&exclude, 8).unwrap();
        assert_eq!(word, "crane");
    }

    #[test]
    fn test_embedded_list_is_usable() {
        let source = WordSource::embedded();
        assert!(source.len() > 100);
        assert!(source.is_valid("crane"));
        assert!(source.is_valid("robot"));
    }
}
