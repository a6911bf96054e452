use std::str::FromStr;

use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::changes::{ChangeFeed, StoreEvent};
use crate::entities::{games, prelude::*};
use crate::error::StoreError;
use game_types::{GameId, GameRecord, GameStats, GameStatus};

/// A game document plus the ownership metadata the store keeps alongside it.
#[derive(Debug, Clone)]
pub struct StoredGame {
    pub user_id: String,
    pub score_earned: i32,
    pub record: GameRecord,
}

pub struct GameRepository {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl GameRepository {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    fn model_to_stored(model: games::Model) -> Result<StoredGame, StoreError> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|err| StoreError::Corrupt(format!("game id '{}': {}", model.id, err)))?;
        let series_id = match &model.series_id {
            Some(raw) => Some(Uuid::parse_str(raw).map_err(|err| {
                StoreError::Corrupt(format!("series id '{}': {}", raw, err))
            })?),
            None => None,
        };

        let stats = model.turns_used.map(|turns_used| GameStats {
            turns_used,
            time_to_complete_ms: model.time_to_complete_ms.unwrap_or(0),
            invalid_word_attempts: model.invalid_word_attempts.unwrap_or(0),
            reused_absent_letters: model.reused_absent_letters.unwrap_or(0),
            reused_wrong_positions: model.reused_wrong_positions.unwrap_or(0),
        });

        Ok(StoredGame {
            user_id: model.user_id,
            score_earned: model.score_earned,
            record: GameRecord {
                id,
                word: model.word,
                guesses: serde_json::from_str(&model.guesses)?,
                status: GameStatus::from_str(&model.status).unwrap_or(GameStatus::Playing),
                created_at: model.created_at.to_rfc3339(),
                stats,
                series_id,
                shared_by: model.shared_by,
                shared_with: serde_json::from_str(&model.shared_with)?,
            },
        })
    }

    /// Persist a finished game. Written once per game, after the in-memory
    /// state already reflects the outcome.
    pub async fn save_completed(
        &self,
        user_id: &str,
        record: &GameRecord,
        score_earned: i32,
    ) -> Result<(), StoreError> {
        let now = Utc::now().into();

        let model = games::ActiveModel {
            id: ActiveValue::Set(record.id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            word: ActiveValue::Set(record.word.clone()),
            guesses: ActiveValue::Set(serde_json::to_string(&record.guesses)?),
            status: ActiveValue::Set(record.status.to_string()),
            score_earned: ActiveValue::Set(score_earned),
            series_id: ActiveValue::Set(record.series_id.map(|id| id.to_string())),
            shared_by: ActiveValue::Set(record.shared_by.clone()),
            shared_with: ActiveValue::Set(serde_json::to_string(&record.shared_with)?),
            turns_used: ActiveValue::Set(record.stats.map(|s| s.turns_used)),
            time_to_complete_ms: ActiveValue::Set(record.stats.map(|s| s.time_to_complete_ms)),
            invalid_word_attempts: ActiveValue::Set(record.stats.map(|s| s.invalid_word_attempts)),
            reused_absent_letters: ActiveValue::Set(record.stats.map(|s| s.reused_absent_letters)),
            reused_wrong_positions: ActiveValue::Set(
                record.stats.map(|s| s.reused_wrong_positions),
            ),
            created_at: ActiveValue::Set(
                chrono::DateTime::parse_from_rfc3339(&record.created_at)
                    .unwrap_or_else(|_| Utc::now().into()),
            ),
            completed_at: ActiveValue::Set(Some(now)),
        };

        Games::insert(model).exec(&self.db).await?;
        self.feed.publish(StoreEvent::GameSaved(record.clone()));
        Ok(())
    }

    /// Look a game up by id, the hydration path for shared deep links.
    pub async fn find_by_id(&self, id: GameId) -> Result<Option<StoredGame>, StoreError> {
        let model = Games::find_by_id(id.to_string()).one(&self.db).await?;
        model.map(Self::model_to_stored).transpose()
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<StoredGame>, StoreError> {
        let models = Games::find()
            .filter(games::Column::UserId.eq(user_id))
            .order_by_desc(games::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::model_to_stored).collect()
    }
}
