//! Create content_node table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContentNode::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentNode::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContentNode::ParentId).string_len(32).null())
                    .col(ColumnDef::new(ContentNode::Slug).string_len(255).not_null())
                    .col(ColumnDef::new(ContentNode::Title).string_len(255).not_null())
                    .col(ColumnDef::new(ContentNode::UrlPath).text().not_null())
                    .col(
                        ColumnDef::new(ContentNode::Live)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ContentNode::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ContentNode::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_node_parent")
                            .from(ContentNode::Table, ContentNode::ParentId)
                            .to(ContentNode::Table, ContentNode::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_content_node_parent_id")
                    .table(ContentNode::Table)
                    .col(ContentNode::ParentId)
                    .to_owned(),
            )
            .await?;

        // Unique constraint on parent_id + slug
        manager
            .create_index(
                Index::create()
                    .name("idx_content_node_parent_slug_unique")
                    .table(ContentNode::Table)
                    .col(ContentNode::ParentId)
                    .col(ContentNode::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_content_node_url_path_unique")
                    .table(ContentNode::Table)
                    .col(ContentNode::UrlPath)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentNode::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContentNode {
    Table,
    Id,
    ParentId,
    Slug,
    Title,
    UrlPath,
    Live,
    CreatedAt,
    UpdatedAt,
}
