//! Home page entity.
//!
//! A free-form landing page in the tree. Unlike actor and movie pages it
//! may have child pages.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "home_homepage")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning content node (title, slug, path)
    #[sea_orm(unique)]
    pub node_id: String,

    /// Rich-text body, may be empty
    #[sea_orm(column_type = "Text")]
    pub body: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::content_node::Entity",
        from = "Column::NodeId",
        to = "super::content_node::Column::Id",
        on_delete = "Cascade"
    )]
    Node,
}

impl Related<super::content_node::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Node.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
