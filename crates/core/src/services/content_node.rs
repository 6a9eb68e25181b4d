//! Content node service.
//!
//! Nodes form the public URL tree. A node's `url_path` is its parent's path
//! followed by its own slug and a trailing `/`; the root is `/`.

use chrono::Utc;
use moviecat_common::{AppError, AppResult, IdGenerator, is_valid_slug, slugify};
use moviecat_db::entities::content_node;
use moviecat_db::repositories::{ContentNodeRepository, NodeMove};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Path of the tree root.
pub const ROOT_PATH: &str = "/";

/// Input for creating a node.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeInput {
    pub parent_id: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Defaults to the slugified title.
    pub slug: Option<String>,
}

/// Input for renaming or re-slugging a node.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RenameNodeInput {
    pub node_id: String,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub slug: Option<String>,
}

/// Response for a node.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResponse {
    pub id: String,
    pub parent_id: Option<String>,
    pub slug: String,
    pub title: String,
    pub url_path: String,
    pub live: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<content_node::Model> for NodeResponse {
    fn from(n: content_node::Model) -> Self {
        Self {
            id: n.id,
            parent_id: n.parent_id,
            slug: n.slug,
            title: n.title,
            url_path: n.url_path,
            live: n.live,
            created_at: n.created_at.to_rfc3339(),
            updated_at: n.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// A node built but not yet inserted.
#[derive(Debug, Clone)]
pub struct NewNode {
    pub id: String,
    pub model: content_node::ActiveModel,
}

/// Path of a child with `slug` under `parent_path`.
#[must_use]
pub fn child_path(parent_path: &str, slug: &str) -> String {
    if parent_path.ends_with('/') {
        format!("{parent_path}{slug}/")
    } else {
        format!("{parent_path}/{slug}/")
    }
}

/// Normalize a looked-up path to the stored form (`/a/b/`).
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return ROOT_PATH.to_string();
    }
    format!("/{trimmed}/")
}

/// Resolve the slug to use for a node.
fn resolve_slug(title: &str, slug: Option<&str>) -> AppResult<String> {
    match slug {
        Some(slug) => {
            if !is_valid_slug(slug) {
                return Err(AppError::Validation(format!("Invalid slug: {slug}")));
            }
            Ok(slug.to_string())
        }
        None => {
            let slug = slugify(title);
            if slug.is_empty() {
                return Err(AppError::Validation(format!(
                    "Cannot derive a slug from title: {title}"
                )));
            }
            Ok(slug)
        }
    }
}

/// Service for the content tree.
#[derive(Clone)]
pub struct ContentNodeService {
    node_repo: ContentNodeRepository,
    id_gen: IdGenerator,
}

impl ContentNodeService {
    /// Create a new content node service.
    #[must_use]
    pub const fn new(node_repo: ContentNodeRepository) -> Self {
        Self {
            node_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Build (but do not insert) a new node.
    ///
    /// Used directly for plain nodes and by the page services (actor, movie,
    /// home page), which insert the node together with the record that owns it.
    pub async fn prepare(
        &self,
        parent_id: Option<&str>,
        title: &str,
        slug: Option<&str>,
    ) -> AppResult<NewNode> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Title must not be empty".to_string()));
        }
        let slug = resolve_slug(title, slug)?;

        let parent_path = match parent_id {
            Some(parent_id) => {
                let parent = self.node_repo.get_by_id(parent_id).await?;
                // movie and actor deletes take their whole subtree with them
                if self.node_repo.is_catalog_page(&parent.id).await? {
                    return Err(AppError::Validation(format!(
                        "Pages cannot be placed under a movie or actor page: {parent_id}"
                    )));
                }
                parent.url_path
            }
            None => ROOT_PATH.to_string(),
        };
        let url_path = child_path(&parent_path, &slug);

        if self.node_repo.find_by_url_path(&url_path).await?.is_some() {
            return Err(AppError::Conflict(format!("Path already taken: {url_path}")));
        }

        let id = self.id_gen.generate();
        let model = content_node::ActiveModel {
            id: Set(id.clone()),
            parent_id: Set(parent_id.map(ToString::to_string)),
            slug: Set(slug),
            title: Set(title.to_string()),
            url_path: Set(url_path),
            live: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        Ok(NewNode { id, model })
    }

    /// Create a plain node.
    pub async fn create(&self, input: CreateNodeInput) -> AppResult<NodeResponse> {
        input.validate()?;

        let new_node = self
            .prepare(input.parent_id.as_deref(), &input.title, input.slug.as_deref())
            .await?;
        let node = self.node_repo.create(new_node.model).await?;

        tracing::info!(node_id = %node.id, url_path = %node.url_path, "Created content node");

        Ok(node.into())
    }

    /// Get a node by ID.
    pub async fn get(&self, id: &str) -> AppResult<NodeResponse> {
        Ok(self.node_repo.get_by_id(id).await?.into())
    }

    /// Resolve a public URL path to its node.
    pub async fn find_by_path(&self, path: &str) -> AppResult<NodeResponse> {
        let url_path = normalize_path(path);
        self.node_repo
            .find_by_url_path(&url_path)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Path: {url_path}")))
    }

    /// Direct children of a node, or the top-level nodes.
    pub async fn children(&self, parent_id: Option<&str>) -> AppResult<Vec<NodeResponse>> {
        if let Some(parent_id) = parent_id {
            self.node_repo.get_by_id(parent_id).await?;
        }
        let nodes = self.node_repo.find_children(parent_id).await?;
        Ok(nodes.into_iter().map(Into::into).collect())
    }

    /// Check a title and/or slug change without writing it.
    ///
    /// Owners apply the result together with their own update.
    pub async fn plan_rename(&self, input: RenameNodeInput) -> AppResult<NodeMove> {
        input.validate()?;

        let node = self.node_repo.get_by_id(&input.node_id).await?;
        let title = input
            .title
            .map_or_else(|| node.title.clone(), |t| t.trim().to_string());
        if title.is_empty() {
            return Err(AppError::Validation("Title must not be empty".to_string()));
        }
        let slug = match input.slug.as_deref() {
            Some(slug) => resolve_slug(&title, Some(slug))?,
            None => node.slug.clone(),
        };

        let parent_path = match node.parent_id.as_deref() {
            Some(parent_id) => self.node_repo.get_by_id(parent_id).await?.url_path,
            None => ROOT_PATH.to_string(),
        };
        let url_path = child_path(&parent_path, &slug);

        if url_path != node.url_path && self.node_repo.find_by_url_path(&url_path).await?.is_some() {
            return Err(AppError::Conflict(format!("Path already taken: {url_path}")));
        }

        Ok(NodeMove {
            node,
            title,
            slug,
            url_path,
        })
    }

    /// Change a node's title and/or slug.
    ///
    /// A new slug moves the node and all of its descendants.
    pub async fn rename(&self, input: RenameNodeInput) -> AppResult<NodeResponse> {
        let planned = self.plan_rename(input).await?;
        let old_path = planned.node.url_path.clone();
        let updated = self.node_repo.relocate(planned).await?;

        if old_path != updated.url_path {
            tracing::info!(
                node_id = %updated.id,
                from = %old_path,
                to = %updated.url_path,
                "Moved content node"
            );
        }

        Ok(updated.into())
    }

    /// Publish or unpublish a node.
    pub async fn set_live(&self, id: &str, live: bool) -> AppResult<NodeResponse> {
        Ok(self.node_repo.set_live(id, live).await?.into())
    }

    /// Delete a node with its subtree.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let node = self.node_repo.get_by_id(id).await?;
        self.node_repo.delete(&node.id).await?;

        tracing::info!(node_id = %node.id, url_path = %node.url_path, "Deleted content node");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviecat_db::entities::{actor, movie};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_node(id: &str, parent_id: Option<&str>, slug: &str, url_path: &str) -> content_node::Model {
        content_node::Model {
            id: id.to_string(),
            parent_id: parent_id.map(ToString::to_string),
            slug: slug.to_string(),
            title: slug.to_string(),
            url_path: url_path.to_string(),
            live: true,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_child_path() {
        assert_eq!(child_path("/", "movies"), "/movies/");
        assert_eq!(child_path("/movies/", "the-matrix"), "/movies/the-matrix/");
        assert_eq!(child_path("/movies", "heat"), "/movies/heat/");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("movies/heat"), "/movies/heat/");
        assert_eq!(normalize_path("/movies/heat/"), "/movies/heat/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_resolve_slug() {
        assert_eq!(resolve_slug("The Matrix", None).unwrap(), "the-matrix");
        assert_eq!(resolve_slug("x", Some("custom_slug")).unwrap(), "custom_slug");
        assert!(resolve_slug("x", Some("bad slug")).is_err());
        assert!(resolve_slug("!!!", None).is_err());
    }

    #[tokio::test]
    async fn test_prepare_under_parent() {
        let parent = create_test_node("p1", None, "movies", "/movies/");

        // parent lookup, owner checks, then conflict check
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[parent]])
                .append_query_results([Vec::<actor::Model>::new()])
                .append_query_results([Vec::<movie::Model>::new()])
                .append_query_results([Vec::<content_node::Model>::new()])
                .into_connection(),
        );

        let service = ContentNodeService::new(ContentNodeRepository::new(db));
        let new_node = service.prepare(Some("p1"), "The Matrix", None).await.unwrap();

        assert_eq!(new_node.model.url_path.unwrap(), "/movies/the-matrix/");
        assert_eq!(new_node.model.slug.unwrap(), "the-matrix");
        assert_eq!(new_node.model.id.unwrap(), new_node.id);
    }

    #[tokio::test]
    async fn test_prepare_rejects_actor_page_as_parent() {
        let parent = create_test_node("na", None, "keanu-reeves", "/keanu-reeves/");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[parent]])
                .append_query_results([[actor::Model {
                    id: "a1".to_string(),
                    node_id: "na".to_string(),
                    age: 58,
                    description: String::new(),
                    image_id: None,
                }]])
                .into_connection(),
        );

        let service = ContentNodeService::new(ContentNodeRepository::new(db));
        let result = service.prepare(Some("na"), "John Wick", None).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_plan_rename_keeps_slug_when_only_title_changes() {
        let node = create_test_node("n1", None, "heat", "/heat/");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[node]])
                .into_connection(),
        );

        let service = ContentNodeService::new(ContentNodeRepository::new(db));
        let planned = service
            .plan_rename(RenameNodeInput {
                node_id: "n1".to_string(),
                title: Some("Heat (1995)".to_string()),
                slug: None,
            })
            .await
            .unwrap();

        assert_eq!(planned.title, "Heat (1995)");
        assert_eq!(planned.url_path, "/heat/");
    }

    #[tokio::test]
    async fn test_prepare_conflicting_path() {
        let existing = create_test_node("n1", None, "heat", "/heat/");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = ContentNodeService::new(ContentNodeRepository::new(db));
        let result = service.prepare(None, "Heat", None).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_find_by_path_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<content_node::Model>::new()])
                .into_connection(),
        );

        let service = ContentNodeService::new(ContentNodeRepository::new(db));
        let result = service.find_by_path("nowhere").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
