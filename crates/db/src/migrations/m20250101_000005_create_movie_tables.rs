//! Create movie table and its actor, director and genre junction tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create movie table
        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Movie::Id).string_len(32).not_null().primary_key())
                    .col(
                        ColumnDef::new(Movie::NodeId)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Movie::Tagline)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Movie::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Movie::ImageId).string_len(32).null())
                    .col(
                        ColumnDef::new(Movie::Year)
                            .small_integer()
                            .not_null()
                            .default(2019)
                            .check(Expr::col(Movie::Year).gte(0)),
                    )
                    .col(ColumnDef::new(Movie::Country).string_len(30).not_null())
                    .col(
                        ColumnDef::new(Movie::WorldPremiere)
                            .date()
                            .not_null()
                            .default(Expr::current_date()),
                    )
                    .col(
                        ColumnDef::new(Movie::Budget)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Movie::Budget).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Movie::FeesInUsa)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Movie::FeesInUsa).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Movie::FeesInWorld)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Movie::FeesInWorld).gte(0)),
                    )
                    .col(ColumnDef::new(Movie::CategoryId).string_len(32).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_node")
                            .from(Movie::Table, Movie::NodeId)
                            .to(ContentNode::Table, ContentNode::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_image")
                            .from(Movie::Table, Movie::ImageId)
                            .to(Image::Table, Image::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_category")
                            .from(Movie::Table, Movie::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_year")
                    .table(Movie::Table)
                    .col(Movie::Year)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_category_id")
                    .table(Movie::Table)
                    .col(Movie::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Cast and director junctions share a shape
        for (table, fk_prefix) in [
            (MovieActor::Table, "fk_movie_actor"),
            (MovieActor::DirectorTable, "fk_movie_director"),
        ] {
            manager
                .create_table(
                    Table::create()
                        .table(table)
                        .if_not_exists()
                        .col(ColumnDef::new(MovieActor::MovieId).string_len(32).not_null())
                        .col(ColumnDef::new(MovieActor::ActorId).string_len(32).not_null())
                        .primary_key(
                            Index::create()
                                .col(MovieActor::MovieId)
                                .col(MovieActor::ActorId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name(format!("{fk_prefix}_movie"))
                                .from(table, MovieActor::MovieId)
                                .to(Movie::Table, Movie::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name(format!("{fk_prefix}_actor"))
                                .from(table, MovieActor::ActorId)
                                .to(Actor::Table, Actor::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // Reverse lookup: an actor's filmography
            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{}_actor_id", &fk_prefix[3..]))
                        .table(table)
                        .col(MovieActor::ActorId)
                        .to_owned(),
                )
                .await?;
        }

        // Create movie_genre table
        manager
            .create_table(
                Table::create()
                    .table(MovieGenre::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MovieGenre::MovieId).string_len(32).not_null())
                    .col(ColumnDef::new(MovieGenre::GenreId).string_len(32).not_null())
                    .primary_key(
                        Index::create()
                            .col(MovieGenre::MovieId)
                            .col(MovieGenre::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genre_movie")
                            .from(MovieGenre::Table, MovieGenre::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genre_genre")
                            .from(MovieGenre::Table, MovieGenre::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_genre_genre_id")
                    .table(MovieGenre::Table)
                    .col(MovieGenre::GenreId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MovieGenre::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MovieActor::DirectorTable).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MovieActor::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Movie::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Movie {
    #[iden = "'catalog.movie'"]
    Table,
    Id,
    NodeId,
    Tagline,
    Description,
    ImageId,
    Year,
    Country,
    WorldPremiere,
    Budget,
    FeesInUsa,
    FeesInWorld,
    CategoryId,
}

#[derive(Iden, Clone, Copy)]
enum MovieActor {
    #[iden = "'catalog.movie_actor'"]
    Table,
    #[iden = "'catalog.movie_director'"]
    DirectorTable,
    MovieId,
    ActorId,
}

#[derive(Iden)]
enum MovieGenre {
    #[iden = "'catalog.movie_genre'"]
    Table,
    MovieId,
    GenreId,
}

#[derive(Iden)]
enum ContentNode {
    Table,
    Id,
}

#[derive(Iden)]
enum Image {
    Table,
    Id,
}

#[derive(Iden)]
enum Category {
    #[iden = "'catalog.category'"]
    Table,
    Id,
}

#[derive(Iden)]
enum Genre {
    #[iden = "'catalog.genre'"]
    Table,
    Id,
}

#[derive(Iden)]
enum Actor {
    #[iden = "'catalog.actor'"]
    Table,
    Id,
}
