//! Image service.
//!
//! Images are registered by reference: the file itself lives in external
//! storage and only its path and dimensions are recorded here.

use chrono::Utc;
use moviecat_common::{AppResult, IdGenerator};
use moviecat_db::entities::image;
use moviecat_db::repositories::ImageRepository;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::input::page_limit;

/// Input for registering an image.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterImageInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub file: String,
    #[validate(range(min = 0))]
    pub width: i32,
    #[validate(range(min = 0))]
    pub height: i32,
}

/// Response for an image.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id: String,
    pub title: String,
    pub file: String,
    pub width: i32,
    pub height: i32,
    pub created_at: String,
}

impl From<image::Model> for ImageResponse {
    fn from(i: image::Model) -> Self {
        Self {
            id: i.id,
            title: i.title,
            file: i.file,
            width: i.width,
            height: i.height,
            created_at: i.created_at.to_rfc3339(),
        }
    }
}

/// Service for image records.
#[derive(Clone)]
pub struct ImageService {
    image_repo: ImageRepository,
    id_gen: IdGenerator,
}

impl ImageService {
    /// Create a new image service.
    #[must_use]
    pub const fn new(image_repo: ImageRepository) -> Self {
        Self {
            image_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register an image.
    pub async fn register(&self, input: RegisterImageInput) -> AppResult<ImageResponse> {
        input.validate()?;

        let model = image::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            file: Set(input.file),
            width: Set(input.width),
            height: Set(input.height),
            created_at: Set(Utc::now().into()),
        };
        let image = self.image_repo.create(model).await?;

        tracing::info!(image_id = %image.id, file = %image.file, "Registered image");

        Ok(image.into())
    }

    /// Get an image.
    pub async fn get(&self, id: &str) -> AppResult<ImageResponse> {
        Ok(self.image_repo.get_by_id(id).await?.into())
    }

    /// List images, newest first.
    pub async fn list(&self, limit: Option<u64>, offset: Option<u64>) -> AppResult<Vec<ImageResponse>> {
        let images = self
            .image_repo
            .find_with_pagination(page_limit(limit), offset.unwrap_or(0))
            .await?;
        Ok(images.into_iter().map(Into::into).collect())
    }

    /// Delete an image record.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let image = self.image_repo.get_by_id(id).await?;
        self.image_repo.delete(&image.id).await?;

        tracing::info!(image_id = %image.id, "Deleted image");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviecat_common::AppError;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_image(id: &str) -> image::Model {
        image::Model {
            id: id.to_string(),
            title: "Poster".to_string(),
            file: "original_images/poster.jpg".to_string(),
            width: 600,
            height: 900,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_negative_width() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = ImageService::new(ImageRepository::new(db));
        let input = RegisterImageInput {
            title: "Poster".to_string(),
            file: "original_images/poster.jpg".to_string(),
            width: -1,
            height: 900,
        };

        assert!(matches!(
            service.register(input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_image("img1")]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let service = ImageService::new(ImageRepository::new(db));
        assert!(service.delete("img1").await.is_ok());
    }
}
