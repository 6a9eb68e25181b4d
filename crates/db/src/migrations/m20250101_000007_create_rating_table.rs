//! Create rating table.
//!
//! No uniqueness on (movie_id, ip): every submission is kept as its own vote.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rating::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rating::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Rating::Ip).string_len(45).not_null())
                    .col(ColumnDef::new(Rating::StarId).string_len(32).not_null())
                    .col(ColumnDef::new(Rating::MovieId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Rating::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rating_star")
                            .from(Rating::Table, Rating::StarId)
                            .to(RatingStar::Table, RatingStar::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rating_movie")
                            .from(Rating::Table, Rating::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rating_movie_id")
                    .table(Rating::Table)
                    .col(Rating::MovieId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rating_star_id")
                    .table(Rating::Table)
                    .col(Rating::StarId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rating::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Rating {
    #[iden = "'catalog.rating'"]
    Table,
    Id,
    Ip,
    StarId,
    MovieId,
    CreatedAt,
}

#[derive(Iden)]
enum RatingStar {
    #[iden = "'catalog.rating_star'"]
    Table,
    Id,
}

#[derive(Iden)]
enum Movie {
    #[iden = "'catalog.movie'"]
    Table,
    Id,
}
