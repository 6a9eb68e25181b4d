//! Create image table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Image::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Image::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Image::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Image::File).string_len(512).not_null())
                    .col(ColumnDef::new(Image::Width).integer().not_null().default(0))
                    .col(ColumnDef::new(Image::Height).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Image::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Image::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Image {
    Table,
    Id,
    Title,
    File,
    Width,
    Height,
    CreatedAt,
}
