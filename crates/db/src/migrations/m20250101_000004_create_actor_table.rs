//! Create actor table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Actor::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Actor::Id).string_len(32).not_null().primary_key())
                    .col(
                        ColumnDef::new(Actor::NodeId)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Actor::Age)
                            .small_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Actor::Age).gte(0)),
                    )
                    .col(ColumnDef::new(Actor::Description).text().not_null())
                    .col(ColumnDef::new(Actor::ImageId).string_len(32).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_actor_node")
                            .from(Actor::Table, Actor::NodeId)
                            .to(ContentNode::Table, ContentNode::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_actor_image")
                            .from(Actor::Table, Actor::ImageId)
                            .to(Image::Table, Image::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Actor::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Actor {
    #[iden = "'catalog.actor'"]
    Table,
    Id,
    NodeId,
    Age,
    Description,
    ImageId,
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
