//! Rating repository (stars and votes).

use std::sync::Arc;

use moviecat_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::entities::{Rating, RatingStar, rating, rating_star};

/// Number of votes cast with one star.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct StarVotes {
    /// Star voted with.
    pub star_id: String,
    /// Number of votes.
    pub votes: i64,
}

/// Rating repository for database operations.
#[derive(Clone)]
pub struct RatingRepository {
    db: Arc<DatabaseConnection>,
}

impl RatingRepository {
    /// Create a new rating repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// All stars, highest value first.
    pub async fn find_stars(&self) -> AppResult<Vec<rating_star::Model>> {
        RatingStar::find()
            .order_by_desc(rating_star::Column::Value)
            .order_by_asc(rating_star::Column::SortOrder)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a star by ID.
    pub async fn find_star_by_id(&self, id: &str) -> AppResult<Option<rating_star::Model>> {
        RatingStar::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a star by ID, returning an error if not found.
    pub async fn get_star_by_id(&self, id: &str) -> AppResult<rating_star::Model> {
        self.find_star_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rating star: {id}")))
    }

    /// Insert a star.
    pub async fn create_star(&self, model: rating_star::ActiveModel) -> AppResult<rating_star::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a star along with every vote cast with it.
    pub async fn delete_star(&self, id: &str) -> AppResult<()> {
        RatingStar::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Record a vote.
    pub async fn create_rating(&self, model: rating::ActiveModel) -> AppResult<rating::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Votes for a movie grouped by star.
    pub async fn vote_counts(&self, movie_id: &str) -> AppResult<Vec<StarVotes>> {
        Rating::find()
            .select_only()
            .column(rating::Column::StarId)
            .column_as(rating::Column::Id.count(), "votes")
            .filter(rating::Column::MovieId.eq(movie_id))
            .group_by(rating::Column::StarId)
            .into_model::<StarVotes>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
