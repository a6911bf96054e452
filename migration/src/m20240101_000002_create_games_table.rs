use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Games::UserId).string().not_null())
                    .col(ColumnDef::new(Games::Word).string().not_null())
                    .col(ColumnDef::new(Games::Guesses).text().not_null())
                    .col(ColumnDef::new(Games::Status).string().not_null())
                    .col(
                        ColumnDef::new(Games::ScoreEarned)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Games::SeriesId).string())
                    .col(ColumnDef::new(Games::SharedBy).string())
                    .col(ColumnDef::new(Games::SharedWith).text().not_null())
                    .col(ColumnDef::new(Games::TurnsUsed).integer())
                    .col(ColumnDef::new(Games::TimeToCompleteMs).big_integer())
                    .col(ColumnDef::new(Games::InvalidWordAttempts).integer())
                    .col(ColumnDef::new(Games::ReusedAbsentLetters).integer())
                    .col(ColumnDef::new(Games::ReusedWrongPositions).integer())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Games::CompletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Create index on user_id for history queries
        manager
            .create_index(
                Index::create()
                    .name("idx_games_user_id")
                    .table(Games::Table)
                    .col(Games::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    UserId,
    Word,
    Guesses,
    Status,
    ScoreEarned,
    SeriesId,
    SharedBy,
    SharedWith,
    TurnsUsed,
    TimeToCompleteMs,
    InvalidWordAttempts,
    ReusedAbsentLetters,
    ReusedWrongPositions,
    CreatedAt,
    CompletedAt,
}
