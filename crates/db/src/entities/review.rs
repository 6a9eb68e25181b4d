//! Review entity.
//!
//! Reviews thread through `parent_id`: a review with no parent is top-level,
//! anything else is a reply. Deleting a parent turns its replies into
//! top-level reviews.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Maximum review text length, in characters.
pub const MAX_TEXT_LENGTH: u64 = 5000;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "'catalog.reviews'")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub movie_id: String,

    #[sea_orm(nullable)]
    pub parent_id: Option<String>,

    pub email: String,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub text: String,

    #[sea_orm(nullable)]
    pub sort_order: Option<i32>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie::Entity",
        from = "Column::MovieId",
        to = "super::movie::Column::Id",
        on_delete = "Cascade"
    )]
    Movie,

    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    Parent,
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
