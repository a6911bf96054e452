use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "series")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub player1: String,
    pub player2: String,
    /// JSON map uid -> display name
    pub player_names: String,
    pub current_game_id: String,
    pub current_word: String,
    pub player1_score: i32,
    pub player2_score: i32,
    /// JSON array of completed game ids
    pub games: String,
    /// JSON map uid -> RoundOutcome for the current word
    pub round_results: String,
    /// JSON array of recently used secrets
    pub recent_words: String,
    pub status: String,
    pub last_played_at: DateTimeWithTimeZone,
    /// Optimistic lock guard; bumped on every successful update
    pub version: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
