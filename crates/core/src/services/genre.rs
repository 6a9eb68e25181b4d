//! Genre service.

use moviecat_common::{AppResult, IdGenerator};
use moviecat_db::entities::genre;
use moviecat_db::repositories::GenreRepository;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for creating a genre.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGenreInput {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Input for updating a genre.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGenreInput {
    pub genre_id: String,
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Response for a genre.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreResponse {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<genre::Model> for GenreResponse {
    fn from(g: genre::Model) -> Self {
        Self {
            id: g.id,
            name: g.name,
            description: g.description,
        }
    }
}

/// Service for managing genres.
#[derive(Clone)]
pub struct GenreService {
    genre_repo: GenreRepository,
    id_gen: IdGenerator,
}

impl GenreService {
    /// Create a new genre service.
    #[must_use]
    pub const fn new(genre_repo: GenreRepository) -> Self {
        Self {
            genre_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a genre.
    pub async fn create(&self, input: CreateGenreInput) -> AppResult<GenreResponse> {
        input.validate()?;

        let model = genre::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name.trim().to_string()),
            description: Set(input.description),
        };
        let genre = self.genre_repo.create(model).await?;

        tracing::info!(genre_id = %genre.id, name = %genre.name, "Created genre");

        Ok(genre.into())
    }

    /// Get a genre.
    pub async fn get(&self, id: &str) -> AppResult<GenreResponse> {
        Ok(self.genre_repo.get_by_id(id).await?.into())
    }

    /// All genres by name.
    pub async fn list(&self) -> AppResult<Vec<GenreResponse>> {
        let genres = self.genre_repo.find_all().await?;
        Ok(genres.into_iter().map(Into::into).collect())
    }

    /// Update a genre.
    pub async fn update(&self, input: UpdateGenreInput) -> AppResult<GenreResponse> {
        input.validate()?;

        let genre = self.genre_repo.get_by_id(&input.genre_id).await?;
        let mut active: genre::ActiveModel = genre.into();
        if let Some(name) = input.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }

        Ok(self.genre_repo.update(active).await?.into())
    }

    /// Delete a genre. Movies tagged with it stay.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let genre = self.genre_repo.get_by_id(id).await?;
        self.genre_repo.delete(&genre.id).await?;

        tracing::info!(genre_id = %genre.id, "Deleted genre");

        Ok(())
    }
}
