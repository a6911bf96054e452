use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub word: String,
    /// JSON array of guess strings
    pub guesses: String,
    pub status: String,
    pub score_earned: i32,
    pub series_id: Option<String>,
    pub shared_by: Option<String>,
    /// JSON array of contacts the result was shared with
    pub shared_with: String,
    pub turns_used: Option<i32>,
    pub time_to_complete_ms: Option<i64>,
    pub invalid_word_attempts: Option<i32>,
    pub reused_absent_letters: Option<i32>,
    pub reused_wrong_positions: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub completed_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
