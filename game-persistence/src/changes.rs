use game_types::{GameRecord, GameSeries};
use tokio::sync::broadcast;

/// Store change notifications, the local stand-in for the hosted document
/// store's realtime listeners.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    GameSaved(GameRecord),
    SeriesUpdated(GameSeries),
    RankingsChanged { user_id: String },
}

/// Broadcast fan-out of successful writes. Subscribing returns a receiver;
/// dropping it unsubscribes. Publishing with no subscribers is a no-op.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<StoreEvent>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: StoreEvent) {
        // Err only means nobody is listening right now
        let _ = self.tx.send(event);
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(64)
    }
}
