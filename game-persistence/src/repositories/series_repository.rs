use std::str::FromStr;

use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
};
use tracing::debug;
use uuid::Uuid;

use crate::changes::{ChangeFeed, StoreEvent};
use crate::entities::{prelude::*, series};
use crate::error::StoreError;
use game_types::{GameSeries, SeriesStatus};

/// How many optimistic-lock rounds an update gets before giving up.
const MAX_UPDATE_RETRIES: usize = 5;

pub struct SeriesRepository {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl SeriesRepository {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    fn model_to_series(model: &series::Model) -> Result<GameSeries, StoreError> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|err| StoreError::Corrupt(format!("series id '{}': {}", model.id, err)))?;
        let current_game_id = Uuid::parse_str(&model.current_game_id).map_err(|err| {
            StoreError::Corrupt(format!("game id '{}': {}", model.current_game_id, err))
        })?;
        let games: Vec<String> = serde_json::from_str(&model.games)?;
        let games = games
            .iter()
            .map(|raw| {
                Uuid::parse_str(raw)
                    .map_err(|err| StoreError::Corrupt(format!("game id '{}': {}", raw, err)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GameSeries {
            id,
            players: [model.player1.clone(), model.player2.clone()],
            player_names: serde_json::from_str(&model.player_names)?,
            current_game_id,
            current_word: model.current_word.clone(),
            player1: model.player1.clone(),
            player2: model.player2.clone(),
            player1_score: model.player1_score,
            player2_score: model.player2_score,
            games,
            round_results: serde_json::from_str(&model.round_results)?,
            recent_words: serde_json::from_str(&model.recent_words)?,
            last_played_at: model.last_played_at.to_rfc3339(),
            status: SeriesStatus::from_str(&model.status).unwrap_or(SeriesStatus::Active),
        })
    }

    pub async fn create(&self, series: &GameSeries) -> Result<(), StoreError> {
        let now = Utc::now().into();

        let model = series::ActiveModel {
            id: ActiveValue::Set(series.id.to_string()),
            player1: ActiveValue::Set(series.player1.clone()),
            player2: ActiveValue::Set(series.player2.clone()),
            player_names: ActiveValue::Set(serde_json::to_string(&series.player_names)?),
            current_game_id: ActiveValue::Set(series.current_game_id.to_string()),
            current_word: ActiveValue::Set(series.current_word.clone()),
            player1_score: ActiveValue::Set(series.player1_score),
            player2_score: ActiveValue::Set(series.player2_score),
            games: ActiveValue::Set(serde_json::to_string(
                &series.games.iter().map(Uuid::to_string).collect::<Vec<_>>(),
            )?),
            round_results: ActiveValue::Set(serde_json::to_string(&series.round_results)?),
            recent_words: ActiveValue::Set(serde_json::to_string(&series.recent_words)?),
            status: ActiveValue::Set(series.status.to_string()),
            last_played_at: ActiveValue::Set(
                chrono::DateTime::parse_from_rfc3339(&series.last_played_at)
                    .unwrap_or_else(|_| Utc::now().into()),
            ),
            version: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        Series::insert(model).exec(&self.db).await?;
        self.feed.publish(StoreEvent::SeriesUpdated(series.clone()));
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GameSeries>, StoreError> {
        let model = Series::find_by_id(id.to_string()).one(&self.db).await?;
        model.as_ref().map(Self::model_to_series).transpose()
    }

    pub async fn list_for_player(&self, uid: &str) -> Result<Vec<GameSeries>, StoreError> {
        let models = Series::find()
            .filter(
                Condition::any()
                    .add(series::Column::Player1.eq(uid))
                    .add(series::Column::Player2.eq(uid)),
            )
            .all(&self.db)
            .await?;

        models.iter().map(Self::model_to_series).collect()
    }

    /// Atomic read-modify-write on a series document.
    ///
    /// The mutation closure runs against the freshly loaded document; the
    /// write is conditional on the version the read observed. On interference
    /// the whole round is retried with the new state, so a concurrent update
    /// from the other player is folded in rather than overwritten.
    pub async fn update_with<R, F>(
        &self,
        id: Uuid,
        mut mutate: F,
    ) -> Result<(GameSeries, R), StoreError>
    where
        F: FnMut(&mut GameSeries) -> anyhow::Result<R>,
    {
        for attempt in 0..MAX_UPDATE_RETRIES {
            let model = Series::find_by_id(id.to_string())
                .one(&self.db)
                .await?
                .ok_or(StoreError::NotFound {
                    entity: "series",
                    id: id.to_string(),
                })?;
            let version = model.version;

            let mut series = Self::model_to_series(&model)?;
            let value =
                mutate(&mut series).map_err(|err| StoreError::Rejected(err.to_string()))?;

            let update = series::ActiveModel {
                player_names: ActiveValue::Set(serde_json::to_string(&series.player_names)?),
                current_game_id: ActiveValue::Set(series.current_game_id.to_string()),
                current_word: ActiveValue::Set(series.current_word.clone()),
                player1_score: ActiveValue::Set(series.player1_score),
                player2_score: ActiveValue::Set(series.player2_score),
                games: ActiveValue::Set(serde_json::to_string(
                    &series.games.iter().map(Uuid::to_string).collect::<Vec<_>>(),
                )?),
                round_results: ActiveValue::Set(serde_json::to_string(&series.round_results)?),
                recent_words: ActiveValue::Set(serde_json::to_string(&series.recent_words)?),
                status: ActiveValue::Set(series.status.to_string()),
                last_played_at: ActiveValue::Set(
                    chrono::DateTime::parse_from_rfc3339(&series.last_played_at)
                        .unwrap_or_else(|_| Utc::now().into()),
                ),
                version: ActiveValue::Set(version + 1),
                updated_at: ActiveValue::Set(Utc::now().into()),
                ..Default::default()
            };

            let result = Series::update_many()
                .set(update)
                .filter(series::Column::Id.eq(id.to_string()))
                .filter(series::Column::Version.eq(version))
                .exec(&self.db)
                .await?;

            if result.rows_affected == 1 {
                self.feed.publish(StoreEvent::SeriesUpdated(series.clone()));
                return Ok((series, value));
            }

            debug!(series = %id, attempt, "series update conflicted, retrying");
        }

        Err(StoreError::Conflict { id: id.to_string() })
    }
}
