use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rankings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rankings::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rankings::Username).string().not_null())
                    .col(
                        ColumnDef::new(Rankings::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Rankings::Tier)
                            .string()
                            .not_null()
                            .default("Bronze"),
                    )
                    .col(
                        ColumnDef::new(Rankings::IconId)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Rankings::IconColor)
                            .string()
                            .not_null()
                            .default("blue"),
                    )
                    .col(
                        ColumnDef::new(Rankings::BackgroundId)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Rankings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on score for top-N and rank-window queries
        manager
            .create_index(
                Index::create()
                    .name("idx_rankings_score")
                    .table(Rankings::Table)
                    .col(Rankings::Score)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rankings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Rankings {
    Table,
    UserId,
    Username,
    Score,
    Tier,
    IconId,
    IconColor,
    BackgroundId,
    UpdatedAt,
}
