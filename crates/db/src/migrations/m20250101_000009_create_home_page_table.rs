//! Create home page table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HomePage::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(HomePage::Id).string_len(32).not_null().primary_key())
                    .col(
                        ColumnDef::new(HomePage::NodeId)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(HomePage::Body).text().not_null().default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_home_page_node")
                            .from(HomePage::Table, HomePage::NodeId)
                            .to(ContentNode::Table, ContentNode::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HomePage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum HomePage {
    #[iden = "home_homepage"]
    Table,
    Id,
    NodeId,
    Body,
}

#[derive(Iden)]
enum ContentNode {
    Table,
    Id,
}
