use game_core::Game;
use game_types::{GameId, LetterVerdict};
use uuid::Uuid;

/// Deep link identifying a shared game, and optionally the series it belongs
/// to. Rendered as URL query parameters and parsed back when a friend opens
/// the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareLink {
    pub game_id: GameId,
    pub series_id: Option<Uuid>,
}

impl ShareLink {
    pub fn for_game(game_id: GameId) -> Self {
        Self {
            game_id,
            series_id: None,
        }
    }

    pub fn with_series(game_id: GameId, series_id: Uuid) -> Self {
        Self {
            game_id,
            series_id: Some(series_id),
        }
    }

    pub fn to_query(&self) -> String {
        match self.series_id {
            Some(series_id) => format!("?game={}&series={}", self.game_id, series_id),
            None => format!("?game={}", self.game_id),
        }
    }

    /// Parse a query string, with or without the leading `?`. Unknown
    /// parameters are ignored; a missing or malformed `game` id is a parse
    /// failure.
    pub fn parse(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut game_id = None;
        let mut series_id = None;
        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "game" => game_id = Uuid::parse_str(value).ok(),
                "series" => series_id = Uuid::parse_str(value).ok(),
                _ => {}
            }
        }

        Some(Self {
            game_id: game_id?,
            series_id,
        })
    }
}

/// The spoiler-free emoji grid of a finished game, one row per guess.
pub fn result_grid(game: &Game) -> String {
    game.history()
        .iter()
        .map(|row| {
            row.verdicts
                .iter()
                .map(|verdict| match verdict {
                    LetterVerdict::Correct => "🟩",
                    LetterVerdict::Present => "🟨",
                    LetterVerdict::Absent => "⬛",
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full clipboard/share-sheet text: grid plus the deep link.
pub fn share_message(game: &Game, base_url: &str) -> String {
    let link = ShareLink::for_game(game.id());
    format!(
        "Word Fill w/ Friends\n\n{}\n\nPlay this word: {}{}",
        result_grid(game),
        base_url,
        link.to_query()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::WordSource;

    #[test]
    fn test_link_roundtrip_without_series() {
        let link = ShareLink::for_game(Uuid::new_v4());
        assert_eq!(ShareLink::parse(&link.to_query()), Some(link));
    }

    #[test]
    fn test_link_roundtrip_with_series() {
        let link = ShareLink::with_series(Uuid::new_v4(), Uuid::new_v4());
        let query = link.to_query();
        assert!(query.contains("&series="));
        assert_eq!(ShareLink::parse(&query), Some(link));
    }

    #[test]
    fn test_parse_ignores_unknown_params() {
        let game_id = Uuid::new_v4();
        let query = format!("utm_source=mail&game={}&theme=dark", game_id);
        let link = ShareLink::parse(&query).unwrap();
        assert_eq!(link.game_id, game_id);
        assert_eq!(link.series_id, None);
    }

    #[test]
    fn test_parse_requires_game_id() {
        assert!(ShareLink::parse("series=not-even-a-uuid").is_none());
        assert!(ShareLink::parse("").is_none());
        assert!(ShareLink::parse("game=garbage").is_none());
    }

    #[test]
    fn test_result_grid_rows_match_guesses() {
        let words = WordSource::from_word_list("crane\nreact\nslate");
        let mut game = Game::new("crane".to_string());
        game.submit_guess("react", &words);
        game.submit_guess("crane", &words);

        let grid = result_grid(&game);
        let rows: Vec<&str> = grid.lines().collect();
        assert_eq!(rows.len(), 2);
        // react vs crane: r,e,c present, a aligned at index 2, t absent
        assert_eq!(rows[0], "🟨🟨🟩🟨⬛");
        assert_eq!(rows[1], "🟩🟩🟩🟩🟩");
    }

    #[test]
    fn test_share_message_carries_link() {
        let words = WordSource::from_word_list("crane");
        let mut game = Game::new("crane".to_string());
        game.submit_guess("crane", &words);

        let message = share_message(&game, "https://wordfill.example");
        assert!(message.contains("🟩🟩🟩🟩🟩"));
        assert!(message.contains(&format!("?game={}", game.id())));
    }
}
