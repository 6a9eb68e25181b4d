//! Gallery repository (movie shots).

use std::sync::Arc;

use moviecat_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
    sea_query::{Expr, NullOrdering, Order},
};

use crate::entities::{MovieShot, movie_shot};

/// Gallery repository for database operations.
#[derive(Clone)]
pub struct GalleryRepository {
    db: Arc<DatabaseConnection>,
}

impl GalleryRepository {
    /// Create a new gallery repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a shot by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<movie_shot::Model>> {
        MovieShot::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a shot by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<movie_shot::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shot: {id}")))
    }

    /// A movie's shots in gallery order. Unpositioned shots come last.
    pub async fn find_by_movie(&self, movie_id: &str) -> AppResult<Vec<movie_shot::Model>> {
        MovieShot::find()
            .filter(movie_shot::Column::MovieId.eq(movie_id))
            .order_by_with_nulls(movie_shot::Column::SortOrder, Order::Asc, NullOrdering::Last)
            .order_by_asc(movie_shot::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Position for a shot appended to the end of the gallery.
    pub async fn next_sort_order(&self, movie_id: &str) -> AppResult<i32> {
        let last = MovieShot::find()
            .filter(movie_shot::Column::MovieId.eq(movie_id))
            .filter(movie_shot::Column::SortOrder.is_not_null())
            .order_by_desc(movie_shot::Column::SortOrder)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(last.and_then(|s| s.sort_order).map_or(0, |n| n + 1))
    }

    /// Insert a shot.
    pub async fn create(&self, model: movie_shot::ActiveModel) -> AppResult<movie_shot::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a shot.
    pub async fn update(&self, model: movie_shot::ActiveModel) -> AppResult<movie_shot::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a shot.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        MovieShot::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Renumber a movie's shots `0..n` in the order of `ids`.
    ///
    /// Fails without changes if any ID is not a shot of this movie.
    pub async fn reorder(&self, movie_id: &str, ids: &[String]) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        for (position, id) in ids.iter().enumerate() {
            let result = MovieShot::update_many()
                .col_expr(movie_shot::Column::SortOrder, Expr::value(position as i32))
                .filter(movie_shot::Column::Id.eq(id.as_str()))
                .filter(movie_shot::Column::MovieId.eq(movie_id))
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

            if result.rows_affected == 0 {
                txn.rollback()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                return Err(AppError::BadRequest(format!(
                    "Shot {id} does not belong to movie {movie_id}"
                )));
            }
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
