//! Genre repository.

use std::sync::Arc;

use moviecat_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entities::{Genre, genre};

/// Genre repository for database operations.
#[derive(Clone)]
pub struct GenreRepository {
    db: Arc<DatabaseConnection>,
}

impl GenreRepository {
    /// Create a new genre repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a genre by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<genre::Model>> {
        Genre::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a genre by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<genre::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre: {id}")))
    }

    /// Find several genres at once.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<genre::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Genre::find()
            .filter(genre::Column::Id.is_in(ids.iter().map(String::as_str)))
            .order_by_asc(genre::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all genres by name.
    pub async fn find_all(&self) -> AppResult<Vec<genre::Model>> {
        Genre::find()
            .order_by_asc(genre::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new genre.
    pub async fn create(&self, model: genre::ActiveModel) -> AppResult<genre::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a genre.
    pub async fn update(&self, model: genre::ActiveModel) -> AppResult<genre::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a genre (movies lose the tag, nothing else).
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Genre::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
