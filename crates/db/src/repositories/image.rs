//! Image repository.

use std::sync::Arc;

use moviecat_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entities::{Image, image};

/// Image repository for database operations.
#[derive(Clone)]
pub struct ImageRepository {
    db: Arc<DatabaseConnection>,
}

impl ImageRepository {
    /// Create a new image repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an image by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<image::Model>> {
        Image::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an image by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<image::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Image: {id}")))
    }

    /// Find several images at once.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<image::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Image::find()
            .filter(image::Column::Id.is_in(ids.iter().map(String::as_str)))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List images, newest first.
    pub async fn find_with_pagination(&self, limit: u64, offset: u64) -> AppResult<Vec<image::Model>> {
        Image::find()
            .order_by_desc(image::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Register a new image.
    pub async fn create(&self, model: image::ActiveModel) -> AppResult<image::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an image.
    ///
    /// Actor and movie references are cleared; gallery shots using it are removed.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Image::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_image(id: &str) -> image::Model {
        image::Model {
            id: id.to_string(),
            title: "Poster".to_string(),
            file: format!("original_images/{id}.jpg"),
            width: 800,
            height: 1200,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_skips_query() {
        // No results appended: any query would fail
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = ImageRepository::new(db);
        let result = repo.find_by_ids(&[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let image = create_test_image("img1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[image]])
                .into_connection(),
        );

        let repo = ImageRepository::new(db);
        let result = repo.get_by_id("img1").await.unwrap();

        assert_eq!(result.width, 800);
    }
}
