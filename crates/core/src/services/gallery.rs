//! Gallery service: stills attached to a movie.

use moviecat_common::{AppError, AppResult, IdGenerator};
use moviecat_db::entities::movie_shot;
use moviecat_db::repositories::{GalleryRepository, ImageRepository, MovieRepository};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ordering::validate_permutation;

/// Input for adding a shot.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddShotInput {
    pub movie_id: String,
    pub image_id: String,
    #[serde(default)]
    pub description: String,
}

/// Input for editing a shot's caption.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShotInput {
    pub shot_id: String,
    pub description: String,
}

/// Input for reordering a gallery.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderShotsInput {
    pub movie_id: String,
    pub shot_ids: Vec<String>,
}

/// Response for a shot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotResponse {
    pub id: String,
    pub movie_id: String,
    pub image_id: String,
    pub description: String,
    pub sort_order: Option<i32>,
}

impl From<movie_shot::Model> for ShotResponse {
    fn from(s: movie_shot::Model) -> Self {
        Self {
            id: s.id,
            movie_id: s.movie_id,
            image_id: s.image_id,
            description: s.description,
            sort_order: s.sort_order,
        }
    }
}

/// Service for movie galleries.
#[derive(Clone)]
pub struct GalleryService {
    gallery_repo: GalleryRepository,
    movie_repo: MovieRepository,
    image_repo: ImageRepository,
    id_gen: IdGenerator,
}

impl GalleryService {
    /// Create a new gallery service.
    #[must_use]
    pub const fn new(
        gallery_repo: GalleryRepository,
        movie_repo: MovieRepository,
        image_repo: ImageRepository,
    ) -> Self {
        Self {
            gallery_repo,
            movie_repo,
            image_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Append a shot to the end of a movie's gallery.
    pub async fn add(&self, input: AddShotInput) -> AppResult<ShotResponse> {
        input.validate()?;

        self.movie_repo.get_by_id(&input.movie_id).await?;
        if self.image_repo.find_by_id(&input.image_id).await?.is_none() {
            return Err(AppError::Validation(format!("Unknown image: {}", input.image_id)));
        }

        let sort_order = self.gallery_repo.next_sort_order(&input.movie_id).await?;
        let model = movie_shot::ActiveModel {
            id: Set(self.id_gen.generate()),
            movie_id: Set(input.movie_id),
            image_id: Set(input.image_id),
            description: Set(input.description),
            sort_order: Set(Some(sort_order)),
        };
        let shot = self.gallery_repo.create(model).await?;

        tracing::info!(shot_id = %shot.id, movie_id = %shot.movie_id, "Added gallery shot");

        Ok(shot.into())
    }

    /// A movie's shots in gallery order.
    pub async fn list(&self, movie_id: &str) -> AppResult<Vec<ShotResponse>> {
        self.movie_repo.get_by_id(movie_id).await?;
        let shots = self.gallery_repo.find_by_movie(movie_id).await?;
        Ok(shots.into_iter().map(Into::into).collect())
    }

    /// Change a shot's caption.
    pub async fn update(&self, input: UpdateShotInput) -> AppResult<ShotResponse> {
        input.validate()?;

        let shot = self.gallery_repo.get_by_id(&input.shot_id).await?;
        let mut active: movie_shot::ActiveModel = shot.into();
        active.description = Set(input.description);

        Ok(self.gallery_repo.update(active).await?.into())
    }

    /// Set the gallery order. `shot_ids` must list every shot exactly once.
    pub async fn reorder(&self, input: ReorderShotsInput) -> AppResult<Vec<ShotResponse>> {
        self.movie_repo.get_by_id(&input.movie_id).await?;

        let current: Vec<String> = self
            .gallery_repo
            .find_by_movie(&input.movie_id)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();
        validate_permutation(&current, &input.shot_ids)?;

        self.gallery_repo
            .reorder(&input.movie_id, &input.shot_ids)
            .await?;

        self.list(&input.movie_id).await
    }

    /// Remove a shot.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let shot = self.gallery_repo.get_by_id(id).await?;
        self.gallery_repo.delete(&shot.id).await
    }
}
