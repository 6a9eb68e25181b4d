//! Create genre, category and rating_star tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create genre table
        manager
            .create_table(
                Table::create()
                    .table(Genre::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Genre::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Genre::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Genre::Description).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Create category table
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Category::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Category::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Category::Description).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Create rating_star table
        manager
            .create_table(
                Table::create()
                    .table(RatingStar::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RatingStar::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RatingStar::Value)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(RatingStar::SortOrder).integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rating_star_value")
                    .table(RatingStar::Table)
                    .col(RatingStar::Value)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RatingStar::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Genre::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Genre {
    #[iden = "'catalog.genre'"]
    Table,
    Id,
    Name,
    Description,
}

#[derive(Iden)]
enum Category {
    #[iden = "'catalog.category'"]
    Table,
    Id,
    Name,
    Description,
}

#[derive(Iden)]
enum RatingStar {
    #[iden = "'catalog.rating_star'"]
    Table,
    Id,
    Value,
    SortOrder,
}
