//! Movie entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Default release year for new movies.
pub const DEFAULT_YEAR: i16 = 2019;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "'catalog.movie'")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning content node (title, slug, path)
    #[sea_orm(unique)]
    pub node_id: String,

    pub tagline: String,

    /// Rich text body, stored as authored
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Poster image
    #[sea_orm(nullable)]
    pub image_id: Option<String>,

    /// Release year
    #[sea_orm(indexed)]
    pub year: i16,

    pub country: String,

    pub world_premiere: Date,

    /// Budget in US dollars
    pub budget: i64,

    /// Box office in the USA, in US dollars
    pub fees_in_usa: i64,

    /// Worldwide box office, in US dollars
    pub fees_in_world: i64,

    #[sea_orm(nullable, indexed)]
    pub category_id: Option<String>,
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

    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,

    #[sea_orm(has_many = "super::movie_actor::Entity")]
    MovieActor,

    #[sea_orm(has_many = "super::movie_director::Entity")]
    MovieDirector,

    #[sea_orm(has_many = "super::movie_genre::Entity")]
    MovieGenre,

    #[sea_orm(has_many = "super::movie_shot::Entity")]
    Shots,

    #[sea_orm(has_many = "super::rating::Entity")]
    Ratings,

    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
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

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
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

impl Related<super::movie_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovieGenre.def()
    }
}

impl Related<super::movie_shot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shots.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
