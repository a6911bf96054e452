use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use game_core::{
    Game, GameEvent, GameEventBus, GameEventHandler, GuessOutcome, ScoringEngine, WordSource,
    apply_round_result, classify, is_promotion, new_series,
};
use game_persistence::{
    ChangeFeed, StoreError, StoreEvent,
    repositories::{GameRepository, RankingRepository, SeriesRepository, UserRepository},
};
use game_types::{
    GameRecord, GameSeries, GameStats, GameStatus, GlobalRanking, RoundOutcome, Tier, User,
};

use crate::config::Config;
use crate::share::ShareLink;

/// Everything a signed-in player's session depends on, injected explicitly
/// rather than reached for through globals.
pub struct SessionContext {
    pub user_id: String,
    pub users: UserRepository,
    pub games: GameRepository,
    pub series: SeriesRepository,
    pub rankings: RankingRepository,
    pub feed: ChangeFeed,
    pub words: Arc<WordSource>,
    pub config: Config,
}

/// One player's signed-in session. Owns the sync pipeline between the
/// in-memory game and the document store: the game always reflects the
/// outcome before any write is attempted, and a failed write costs nothing
/// but an unsynced result.
pub struct Session {
    ctx: SessionContext,
    events: Mutex<GameEventBus>,
}

impl Session {
    pub fn new(ctx: SessionContext) -> Self {
        Self {
            ctx,
            events: Mutex::new(GameEventBus::new()),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.ctx.user_id
    }

    pub fn add_event_handler(&self, handler: Box<dyn GameEventHandler + Send>) {
        if let Ok(mut bus) = self.events.lock() {
            bus.add_handler(handler);
        }
    }

    /// Listen for store change notifications. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe_store(&self) -> broadcast::Receiver<StoreEvent> {
        self.ctx.feed.subscribe()
    }

    /// Load the player's profile, creating it on first sign-in.
    pub async fn ensure_profile(&self, username: &str) -> Result<User, StoreError> {
        if let Some(user) = self.ctx.users.find_by_uid(&self.ctx.user_id).await? {
            return Ok(user);
        }

        info!(uid = %self.ctx.user_id, "creating profile on first sign-in");
        self.ctx
            .users
            .create_user(User {
                uid: self.ctx.user_id.clone(),
                username: username.to_string(),
                score: 0,
                games_played: 0,
                wins: 0,
                win_rate: 0.0,
                tier: Tier::Bronze,
                icon_id: 1,
                icon_color: "blue".to_string(),
                background_id: 1,
                last_game_at: None,
            })
            .await
    }

    /// Start a fresh solo puzzle on a random secret.
    pub fn new_game(&self) -> anyhow::Result<Game> {
        Ok(Game::new(self.ctx.words.random_word()?))
    }

    /// Hydrate a fresh attempt from a shared deep link: same secret, empty
    /// board, origin recorded.
    pub async fn open_shared(&self, link: &ShareLink) -> Result<Game, StoreError> {
        let stored =
            self.ctx
                .games
                .find_by_id(link.game_id)
                .await?
                .ok_or(StoreError::NotFound {
                    entity: "game",
                    id: link.game_id.to_string(),
                })?;

        Ok(Game::with_origin(
            stored.record.word,
            link.series_id,
            Some(stored.user_id),
        ))
    }

    /// Open a head-to-head series against `opponent`, starting on
    /// `first_word`.
    pub async fn start_series(
        &self,
        my_name: &str,
        opponent: (&str, &str),
        first_word: &str,
    ) -> Result<GameSeries, StoreError> {
        let series = new_series(
            (self.ctx.user_id.as_str(), my_name),
            opponent,
            first_word.to_string(),
            Utc::now(),
        );
        self.ctx.series.create(&series).await?;
        Ok(series)
    }

    /// The local attempt at a series' current shared word.
    pub fn open_series_game(&self, series: &GameSeries) -> Game {
        Game::with_origin(series.current_word.clone(), Some(series.id), None)
    }

    pub async fn my_series(&self) -> Result<Vec<GameSeries>, StoreError> {
        self.ctx.series.list_for_player(&self.ctx.user_id).await
    }

    pub async fn leaderboard(&self) -> Result<Vec<GlobalRanking>, StoreError> {
        self.ctx.rankings.top(self.ctx.config.leaderboard_size).await
    }

    pub async fn nearby_rankings(&self) -> Result<Vec<GlobalRanking>, StoreError> {
        self.ctx
            .rankings
            .around(&self.ctx.user_id, self.ctx.config.nearby_window)
            .await
    }

    pub async fn profile(&self) -> Result<Option<User>, StoreError> {
        self.ctx.users.find_by_uid(&self.ctx.user_id).await
    }

    /// Apply a guess. The in-memory game reflects the outcome first; if the
    /// attempt completed, one best-effort sync follows. A failed sync is
    /// surfaced through the event bus and dropped, never retried, and never
    /// rolls the game back.
    pub async fn submit_guess(&self, game: &mut Game, raw_guess: &str) -> GuessOutcome {
        let outcome = game.submit_guess(raw_guess, &self.ctx.words);

        if let GuessOutcome::Completed { record, stats, .. } = &outcome {
            self.sync_completed(record, stats).await;
        }

        outcome
    }

    async fn sync_completed(&self, record: &GameRecord, stats: &GameStats) {
        let game_score = ScoringEngine::game_score(stats);
        self.publish(GameEvent::GameCompleted {
            record: record.clone(),
            stats: *stats,
            game_score,
        });

        if let Err(err) = self.try_sync(record, stats, game_score).await {
            warn!(game = %record.id, error = %err, "failed to sync completed game");
            self.publish(GameEvent::SyncFailed {
                game_id: record.id,
                message: err.to_string(),
            });
        }
    }

    async fn try_sync(
        &self,
        record: &GameRecord,
        stats: &GameStats,
        game_score: i32,
    ) -> Result<(), StoreError> {
        let uid = &self.ctx.user_id;
        let mut user = self
            .ctx
            .users
            .find_by_uid(uid)
            .await?
            .ok_or(StoreError::NotFound {
                entity: "user",
                id: uid.clone(),
            })?;

        let delta = ScoringEngine::rank_change(game_score, user.tier);
        let old_tier = user.tier;

        user.score = ScoringEngine::apply_rank_change(user.score, delta);
        user.games_played += 1;
        if record.status == GameStatus::Won {
            user.wins += 1;
        }
        user.win_rate = f64::from(user.wins) / f64::from(user.games_played) * 100.0;
        user.tier = classify(user.score);
        user.last_game_at = Some(Utc::now().to_rfc3339());

        self.ctx.users.save_profile(&user).await?;
        self.ctx.rankings.upsert_from_user(&user).await?;
        self.ctx.games.save_completed(uid, record, game_score).await?;

        self.publish(GameEvent::RankAdjusted {
            uid: uid.clone(),
            delta,
            new_score: user.score,
        });
        if user.tier != old_tier {
            self.publish(GameEvent::TierChanged {
                uid: uid.clone(),
                from: old_tier,
                to: user.tier,
                promoted: is_promotion(old_tier, user.tier),
            });
        }

        if let Some(series_id) = record.series_id {
            self.report_series_result(series_id, record, stats).await?;
        }

        Ok(())
    }

    async fn report_series_result(
        &self,
        series_id: Uuid,
        record: &GameRecord,
        stats: &GameStats,
    ) -> Result<(), StoreError> {
        let uid = self.ctx.user_id.clone();
        let outcome = RoundOutcome {
            won: record.status == GameStatus::Won,
            turns_used: stats.turns_used,
        };
        let words = self.ctx.words.clone();
        let retries = self.ctx.config.series_word_retries;

        let (series, advanced) = self
            .ctx
            .series
            .update_with(series_id, move |series| {
                apply_round_result(series, &uid, outcome, &words, retries, Utc::now())
            })
            .await?;

        if let Some(next_game_id) = advanced {
            self.publish(GameEvent::SeriesAdvanced {
                series_id: series.id,
                next_game_id,
            });
        }

        Ok(())
    }

    fn publish(&self, event: GameEvent) {
        if let Ok(mut bus) = self.events.lock() {
            bus.publish(event);
        }
    }
}
