//! Actor entity.
//!
//! Covers both actors and directors; the role is decided by which movie
//! junction table references the row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "'catalog.actor'")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning content node (title, slug, path)
    #[sea_orm(unique)]
    pub node_id: String,

    /// Age in years
    #[sea_orm(default_value = 0)]
    pub age: i16,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Portrait image
    #[sea_orm(nullable)]
    pub image_id: Option<String>,
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

    #[sea_orm(
        belongs_to = "super::image::Entity",
        from = "Column::ImageId",
        to = "super::image::Column::Id",
        on_delete = "SetNull"
    )]
    Image,

    #[sea_orm(has_many = "super::movie_actor::Entity")]
    MovieActor,

    #[sea_orm(has_many = "super::movie_director::Entity")]
    MovieDirector,
}

impl Related<super::content_node::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Node.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl Related<super::movie_actor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieActor.def()
    }
}

impl Related<super::movie_director::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieDirector.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
