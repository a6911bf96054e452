use std::str::FromStr;

use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::entities::{prelude::*, users};
use crate::error::StoreError;
use game_types::{Tier, User};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_user(model: users::Model) -> User {
        User {
            uid: model.uid,
            username: model.username,
            score: model.score,
            games_played: model.games_played,
            wins: model.wins,
            win_rate: model.win_rate,
            tier: Tier::from_str(&model.tier).unwrap_or(Tier::Bronze),
            icon_id: model.icon_id,
            icon_color: model.icon_color,
            background_id: model.background_id,
            last_game_at: model.last_game_at.map(|at| at.to_rfc3339()),
        }
    }

    pub async fn find_by_uid(&self, uid: &str) -> Result<Option<User>, StoreError> {
        let model = Users::find_by_id(uid.to_string()).one(&self.db).await?;
        Ok(model.map(Self::model_to_user))
    }

    pub async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let now = Utc::now().into();

        let model = users::ActiveModel {
            uid: ActiveValue::Set(user.uid.clone()),
            username: ActiveValue::Set(user.username),
            score: ActiveValue::Set(user.score),
            games_played: ActiveValue::Set(user.games_played),
            wins: ActiveValue::Set(user.wins),
            win_rate: ActiveValue::Set(user.win_rate),
            tier: ActiveValue::Set(user.tier.to_string()),
            icon_id: ActiveValue::Set(user.icon_id),
            icon_color: ActiveValue::Set(user.icon_color),
            background_id: ActiveValue::Set(user.background_id),
            last_game_at: ActiveValue::Set(
                user.last_game_at.as_deref().map(parse_timestamp),
            ),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        Users::insert(model).exec(&self.db).await?;

        self.find_by_uid(&user.uid)
            .await?
            .ok_or(StoreError::NotFound {
                entity: "user",
                id: user.uid,
            })
    }

    /// Write back the mutable profile fields after a completed game. The
    /// caller has already applied the scoring pipeline, so `score` arrives
    /// clamped and `tier` already reclassified.
    pub async fn save_profile(&self, user: &User) -> Result<(), StoreError> {
        let existing = Users::find_by_id(user.uid.clone())
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound {
                entity: "user",
                id: user.uid.clone(),
            })?;

        let updated = users::ActiveModel {
            uid: ActiveValue::Unchanged(existing.uid),
            username: ActiveValue::Set(user.username.clone()),
            score: ActiveValue::Set(user.score),
            games_played: ActiveValue::Set(user.games_played),
            wins: ActiveValue::Set(user.wins),
            win_rate: ActiveValue::Set(user.win_rate),
            tier: ActiveValue::Set(user.tier.to_string()),
            icon_id: ActiveValue::Set(user.icon_id),
            icon_color: ActiveValue::Set(user.icon_color.clone()),
            background_id: ActiveValue::Set(user.background_id),
            last_game_at: ActiveValue::Set(
                user.last_game_at.as_deref().map(parse_timestamp),
            ),
            created_at: ActiveValue::Unchanged(existing.created_at),
            updated_at: ActiveValue::Set(Utc::now().into()),
        };

        Users::update(updated).exec(&self.db).await?;
        Ok(())
    }
}

fn parse_timestamp(raw: &str) -> sea_orm::prelude::DateTimeWithTimeZone {
    chrono::DateTime::parse_from_rfc3339(raw).unwrap_or_else(|_| Utc::now().into())
}
