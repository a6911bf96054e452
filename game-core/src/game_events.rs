use game_types::{GameId, GameRecord, GameStats, Tier};
use uuid::Uuid;

/// In-process notifications produced while syncing a finished game. The UI
/// layer renders these as toasts; tests collect them.
#[derive(Debug, Clone)]
pub enum GameEvent {
    GameCompleted {
        record: GameRecord,
        stats: GameStats,
        game_score: i32,
    },
    RankAdjusted {
        uid: String,
        delta: i32,
        new_score: i32,
    },
    TierChanged {
        uid: String,
        from: Tier,
        to: Tier,
        promoted: bool,
    },
    SeriesAdvanced {
        series_id: Uuid,
        next_game_id: GameId,
    },
    SyncFailed {
        game_id: GameId,
        message: String,
    },
}

/// Event handler trait for processing game events
pub trait GameEventHandler {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler + Send>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler + Send>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}
