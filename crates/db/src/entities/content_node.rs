//! Content node entity.
//!
//! A node is one position in the page tree. Actors, movies and home pages
//! each own exactly one node, which carries their title, slug and public
//! URL path.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content_node")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Parent node ID (None for top-level nodes)
    #[sea_orm(nullable, indexed)]
    pub parent_id: Option<String>,

    /// URL segment, unique among siblings
    pub slug: String,

    /// Display title
    pub title: String,

    /// Full path from the root, always ending in `/`
    #[sea_orm(unique)]
    pub url_path: String,

    /// Whether the node is published
    #[sea_orm(default_value = true)]
    pub live: bool,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "Cascade"
    )]
    Parent,

    #[sea_orm(has_one = "super::actor::Entity")]
    Actor,

    #[sea_orm(has_one = "super::movie::Entity")]
    Movie,

    #[sea_orm(has_one = "super::home_page::Entity")]
    HomePage,
}

impl Related<super::actor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actor.def()
    }
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl Related<super::home_page::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HomePage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
