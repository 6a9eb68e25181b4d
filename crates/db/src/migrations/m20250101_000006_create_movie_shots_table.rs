//! Create movie_shots (gallery) table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MovieShots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MovieShots::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MovieShots::MovieId).string_len(32).not_null())
                    .col(ColumnDef::new(MovieShots::ImageId).string_len(32).not_null())
                    .col(ColumnDef::new(MovieShots::Description).text().not_null())
                    .col(ColumnDef::new(MovieShots::SortOrder).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_shots_movie")
                            .from(MovieShots::Table, MovieShots::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_shots_image")
                            .from(MovieShots::Table, MovieShots::ImageId)
                            .to(Image::Table, Image::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (movie_id, sort_order) for ordered gallery listing
        manager
            .create_index(
                Index::create()
                    .name("idx_movie_shots_movie_sort")
                    .table(MovieShots::Table)
                    .col(MovieShots::MovieId)
                    .col(MovieShots::SortOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MovieShots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MovieShots {
    #[iden = "'catalog.movie_shots'"]
    Table,
    Id,
    MovieId,
    ImageId,
    Description,
    SortOrder,
}

#[derive(Iden)]
enum Movie {
    #[iden = "'catalog.movie'"]
    Table,
    Id,
}

#[derive(Iden)]
enum Image {
    Table,
    Id,
}
