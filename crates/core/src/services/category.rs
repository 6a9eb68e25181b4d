//! Category service.

use moviecat_common::{AppResult, IdGenerator};
use moviecat_db::entities::category;
use moviecat_db::repositories::CategoryRepository;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for creating a category.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryInput {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Input for updating a category.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryInput {
    pub category_id: String,
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Response for a category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<category::Model> for CategoryResponse {
    fn from(g: category::Model) -> Self {
        Self {
            id: g.id,
            name: g.name,
            description: g.description,
        }
    }
}

/// Service for managing categories.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
    id_gen: IdGenerator,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub const fn new(category_repo: CategoryRepository) -> Self {
        Self {
            category_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a category.
    pub async fn create(&self, input: CreateCategoryInput) -> AppResult<CategoryResponse> {
        input.validate()?;

        let model = category::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name.trim().to_string()),
            description: Set(input.description),
        };
        let category = self.category_repo.create(model).await?;

        tracing::info!(category_id = %category.id, name = %category.name, "Created category");

        Ok(category.into())
    }

    /// Get a category.
    pub async fn get(&self, id: &str) -> AppResult<CategoryResponse> {
        Ok(self.category_repo.get_by_id(id).await?.into())
    }

    /// All categories by name.
    pub async fn list(&self) -> AppResult<Vec<CategoryResponse>> {
        let categories = self.category_repo.find_all().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Update a category.
    pub async fn update(&self, input: UpdateCategoryInput) -> AppResult<CategoryResponse> {
        input.validate()?;

        let category = self.category_repo.get_by_id(&input.category_id).await?;
        let mut active: category::ActiveModel = category.into();
        if let Some(name) = input.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }

        Ok(self.category_repo.update(active).await?.into())
    }

    /// Delete a category. Its movies stay, uncategorized.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let category = self.category_repo.get_by_id(id).await?;
        self.category_repo.delete(&category.id).await?;

        tracing::info!(category_id = %category.id, "Deleted category");

        Ok(())
    }
}
