//! Review repository.

use std::sync::Arc;

use moviecat_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
    sea_query::{Expr, NullOrdering, Order},
};

use crate::entities::{Review, review};

/// Review repository for database operations.
#[derive(Clone)]
pub struct ReviewRepository {
    db: Arc<DatabaseConnection>,
}

impl ReviewRepository {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a review by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<review::Model>> {
        Review::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a review by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<review::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ReviewNotFound(id.to_string()))
    }

    /// Reviews of a movie that are not replies.
    pub async fn find_top_level(&self, movie_id: &str) -> AppResult<Vec<review::Model>> {
        Review::find()
            .filter(review::Column::MovieId.eq(movie_id))
            .filter(review::Column::ParentId.is_null())
            .order_by_with_nulls(review::Column::SortOrder, Order::Asc, NullOrdering::Last)
            .order_by_asc(review::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Direct replies to a review.
    pub async fn find_replies(&self, parent_id: &str) -> AppResult<Vec<review::Model>> {
        Review::find()
            .filter(review::Column::ParentId.eq(parent_id))
            .order_by_with_nulls(review::Column::SortOrder, Order::Asc, NullOrdering::Last)
            .order_by_asc(review::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Every review of a movie, replies included.
    pub async fn find_by_movie(&self, movie_id: &str) -> AppResult<Vec<review::Model>> {
        Review::find()
            .filter(review::Column::MovieId.eq(movie_id))
            .order_by_with_nulls(review::Column::SortOrder, Order::Asc, NullOrdering::Last)
            .order_by_asc(review::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Position for a new review among its siblings.
    pub async fn next_sort_order(&self, movie_id: &str, parent_id: Option<&str>) -> AppResult<i32> {
        let query = Review::find().filter(review::Column::MovieId.eq(movie_id));
        let query = match parent_id {
            Some(parent_id) => query.filter(review::Column::ParentId.eq(parent_id)),
            None => query.filter(review::Column::ParentId.is_null()),
        };

        let last = query
            .filter(review::Column::SortOrder.is_not_null())
            .order_by_desc(review::Column::SortOrder)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(last.and_then(|r| r.sort_order).map_or(0, |n| n + 1))
    }

    /// Insert a review.
    pub async fn create(&self, model: review::ActiveModel) -> AppResult<review::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a review. Its replies become top-level reviews.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Review::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Renumber a movie's top-level reviews `0..n` in the order of `ids`.
    pub async fn reorder(&self, movie_id: &str, ids: &[String]) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        for (position, id) in ids.iter().enumerate() {
            let result = Review::update_many()
                .col_expr(review::Column::SortOrder, Expr::value(position as i32))
                .filter(review::Column::Id.eq(id.as_str()))
                .filter(review::Column::MovieId.eq(movie_id))
                .filter(review::Column::ParentId.is_null())
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            if result.rows_affected == 0 {
                txn.rollback()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                return Err(AppError::BadRequest(format!(
                    "Review {id} is not a top-level review of movie {movie_id}"
                )));
            }
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
