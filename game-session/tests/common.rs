use std::sync::{Arc, Mutex};

use sea_orm::DatabaseConnection;

use game_core::{GameEvent, GameEventHandler, WordSource};
use game_persistence::{
    ChangeFeed,
    connection::connect_to_memory_database,
    repositories::{GameRepository, RankingRepository, SeriesRepository, UserRepository},
};
use game_session::{Config, Session, SessionContext};
use migration::{Migrator, MigratorTrait};

/// Word list used across the session tests
pub const TEST_WORDS: &str =
    "crane\nreact\nslate\nstone\nhello\nworld\nmouse\nhouse\nnotes\ndumpy";

pub fn test_config() -> Config {
    Config {
        words_file: None,
        leaderboard_size: 5,
        nearby_window: 3,
        series_word_retries: 10,
    }
}

/// In-memory store with the schema applied
pub async fn shared_test_db() -> DatabaseConnection {
    let db = connect_to_memory_database().await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

/// Builds a session for `uid` against a shared store
pub fn session_for(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    uid: &str,
    word_list: &str,
) -> Session {
    Session::new(SessionContext {
        user_id: uid.to_string(),
        users: UserRepository::new(db.clone()),
        games: GameRepository::new(db.clone(), feed.clone()),
        series: SeriesRepository::new(db.clone(), feed.clone()),
        rankings: RankingRepository::new(db.clone(), feed.clone()),
        feed: feed.clone(),
        words: Arc::new(WordSource::from_word_list(word_list)),
        config: test_config(),
    })
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn has_event(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}
