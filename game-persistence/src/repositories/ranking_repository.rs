use std::str::FromStr;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::changes::{ChangeFeed, StoreEvent};
use crate::entities::{prelude::*, rankings};
use crate::error::StoreError;
use game_types::{GlobalRanking, Tier, User};

pub struct RankingRepository {
    db: DatabaseConnection,
    feed: ChangeFeed,
}

impl RankingRepository {
    pub fn new(db: DatabaseConnection, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    fn model_to_ranking(model: rankings::Model, rank: u32) -> GlobalRanking {
        GlobalRanking {
            user_id: model.user_id,
            username: model.username,
            score: model.score,
            rank,
            tier: Tier::from_str(&model.tier).unwrap_or(Tier::Bronze),
            icon_id: model.icon_id,
            icon_color: model.icon_color,
            background_id: model.background_id,
        }
    }

    /// Refresh a user's leaderboard row from their profile.
    pub async fn upsert_from_user(&self, user: &User) -> Result<(), StoreError> {
        let model = rankings::ActiveModel {
            user_id: ActiveValue::Set(user.uid.clone()),
            username: ActiveValue::Set(user.username.clone()),
            score: ActiveValue::Set(user.score),
            tier: ActiveValue::Set(user.tier.to_string()),
            icon_id: ActiveValue::Set(user.icon_id),
            icon_color: ActiveValue::Set(user.icon_color.clone()),
            background_id: ActiveValue::Set(user.background_id),
            updated_at: ActiveValue::Set(Utc::now().into()),
        };

        Rankings::insert(model)
            .on_conflict(
                OnConflict::column(rankings::Column::UserId)
                    .update_columns([
                        rankings::Column::Username,
                        rankings::Column::Score,
                        rankings::Column::Tier,
                        rankings::Column::IconId,
                        rankings::Column::IconColor,
                        rankings::Column::BackgroundId,
                        rankings::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        self.feed.publish(StoreEvent::RankingsChanged {
            user_id: user.uid.clone(),
        });
        Ok(())
    }

    /// Top of the leaderboard, scores descending.
    pub async fn top(&self, limit: u64) -> Result<Vec<GlobalRanking>, StoreError> {
        let models = Rankings::find()
            .order_by_desc(rankings::Column::Score)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .enumerate()
            .map(|(index, model)| Self::model_to_ranking(model, index as u32 + 1))
            .collect())
    }

    /// A user's global rank: one more than the number of strictly better scores.
    pub async fn rank_of(&self, user_id: &str) -> Result<Option<u32>, StoreError> {
        let row = Rankings::find_by_id(user_id.to_string())
            .one(&self.db)
            .await?;

        if let Some(model) = row {
            let better = Rankings::find()
                .filter(rankings::Column::Score.gt(model.score))
                .count(&self.db)
                .await?;
            Ok(Some(better as u32 + 1))
        } else {
            Ok(None)
        }
    }

    /// The leaderboard window surrounding a user: `window` neighbors above and
    /// below their rank.
    pub async fn around(
        &self,
        user_id: &str,
        window: u64,
    ) -> Result<Vec<GlobalRanking>, StoreError> {
        let Some(rank) = self.rank_of(user_id).await? else {
            return Ok(Vec::new());
        };

        let offset = u64::from(rank - 1).saturating_sub(window);
        let models = Rankings::find()
            .order_by_desc(rankings::Column::Score)
            .offset(offset)
            .limit(window * 2 + 1)
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .enumerate()
            .map(|(index, model)| Self::model_to_ranking(model, offset as u32 + index as u32 + 1))
            .collect())
    }
}
