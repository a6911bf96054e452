use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Series::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Series::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Series::Player1).string().not_null())
                    .col(ColumnDef::new(Series::Player2).string().not_null())
                    .col(ColumnDef::new(Series::PlayerNames).text().not_null())
                    .col(ColumnDef::new(Series::CurrentGameId).string().not_null())
                    .col(ColumnDef::new(Series::CurrentWord).string().not_null())
                    .col(
                        ColumnDef::new(Series::Player1Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Series::Player2Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Series::Games).text().not_null())
                    .col(ColumnDef::new(Series::RoundResults).text().not_null())
                    .col(ColumnDef::new(Series::RecentWords).text().not_null())
                    .col(ColumnDef::new(Series::Status).string().not_null())
                    .col(
                        ColumnDef::new(Series::LastPlayedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Optimistic lock guard for concurrent round completions
                    .col(
                        ColumnDef::new(Series::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Series::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Series::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes on both player columns for sidebar queries
        manager
            .create_index(
                Index::create()
                    .name("idx_series_player1")
                    .table(Series::Table)
                    .col(Series::Player1)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_series_player2")
                    .table(Series::Table)
                    .col(Series::Player2)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Series::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Series {
    Table,
    Id,
    Player1,
    Player2,
    PlayerNames,
    CurrentGameId,
    CurrentWord,
    Player1Score,
    Player2Score,
    Games,
    RoundResults,
    RecentWords,
    Status,
    LastPlayedAt,
    Version,
    CreatedAt,
    UpdatedAt,
}
