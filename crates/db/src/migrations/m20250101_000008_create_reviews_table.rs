//! Create reviews table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Reviews::MovieId).string_len(32).not_null())
                    .col(ColumnDef::new(Reviews::ParentId).string_len(32).null())
                    .col(ColumnDef::new(Reviews::Email).string_len(254).not_null())
                    .col(ColumnDef::new(Reviews::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Reviews::Text).text().not_null())
                    .col(ColumnDef::new(Reviews::SortOrder).integer().null())
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_movie")
                            .from(Reviews::Table, Reviews::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_parent")
                            .from(Reviews::Table, Reviews::ParentId)
                            .to(Reviews::Table, Reviews::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (movie_id, parent_id) for top-level and thread queries
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_movie_parent")
                    .table(Reviews::Table)
                    .col(Reviews::MovieId)
                    .col(Reviews::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_parent_id")
                    .table(Reviews::Table)
                    .col(Reviews::ParentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reviews {
    #[iden = "'catalog.reviews'"]
    Table,
    Id,
    MovieId,
    ParentId,
    Email,
    Name,
    Text,
    SortOrder,
    CreatedAt,
}

#[derive(Iden)]
enum Movie {
    #[iden = "'catalog.movie'"]
    Table,
    Id,
}
