//! Home page service.

use moviecat_common::{AppError, AppResult, IdGenerator};
use moviecat_db::entities::{content_node, home_page};
use moviecat_db::repositories::HomePageRepository;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::content_node::{ContentNodeService, NodeResponse, RenameNodeInput, normalize_path};
use super::input::page_limit;

/// Input for creating a home page.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHomePageInput {
    pub parent_id: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub body: String,
}

/// Input for updating a home page.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHomePageInput {
    pub page_id: String,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
}

/// Response for a home page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageResponse {
    pub id: String,
    pub node: NodeResponse,
    pub body: String,
}

impl HomePageResponse {
    /// Combine a page with its node.
    pub fn from_parts(
        page: home_page::Model,
        node: Option<content_node::Model>,
    ) -> AppResult<Self> {
        let node = node.ok_or_else(|| {
            AppError::Internal(format!("Home page {} has no content node", page.id))
        })?;

        Ok(Self {
            id: page.id,
            node: node.into(),
            body: page.body,
        })
    }
}

/// Service for home pages.
#[derive(Clone)]
pub struct HomePageService {
    page_repo: HomePageRepository,
    node_service: ContentNodeService,
    id_gen: IdGenerator,
}

impl HomePageService {
    /// Create a new home page service.
    #[must_use]
    pub const fn new(page_repo: HomePageRepository, node_service: ContentNodeService) -> Self {
        Self {
            page_repo,
            node_service,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a home page with its node.
    pub async fn create(&self, input: CreateHomePageInput) -> AppResult<HomePageResponse> {
        input.validate()?;

        let new_node = self
            .node_service
            .prepare(input.parent_id.as_deref(), &input.title, input.slug.as_deref())
            .await?;
        let model = home_page::ActiveModel {
            id: Set(self.id_gen.generate()),
            node_id: Set(new_node.id),
            body: Set(input.body),
        };
        let (page, node) = self.page_repo.create(new_node.model, model).await?;

        tracing::info!(page_id = %page.id, url_path = %node.url_path, "Created home page");

        HomePageResponse::from_parts(page, Some(node))
    }

    /// Get a home page.
    pub async fn get(&self, id: &str) -> AppResult<HomePageResponse> {
        let (page, node) = self
            .page_repo
            .find_with_node(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Home page: {id}")))?;
        HomePageResponse::from_parts(page, node)
    }

    /// Get a home page by public URL path.
    pub async fn get_by_path(&self, path: &str) -> AppResult<HomePageResponse> {
        let url_path = normalize_path(path);
        let (page, node) = self
            .page_repo
            .find_by_url_path(&url_path)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Home page: {url_path}")))?;
        HomePageResponse::from_parts(page, node)
    }

    /// List home pages by path.
    pub async fn list(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> AppResult<Vec<HomePageResponse>> {
        self.page_repo
            .find_with_pagination(page_limit(limit), offset.unwrap_or(0))
            .await?
            .into_iter()
            .map(|(page, node)| HomePageResponse::from_parts(page, node))
            .collect()
    }

    /// Update a home page. A new title or slug renames the page node.
    pub async fn update(&self, input: UpdateHomePageInput) -> AppResult<HomePageResponse> {
        input.validate()?;

        let page = self.page_repo.get_by_id(&input.page_id).await?;

        let node_move = if input.title.is_some() || input.slug.is_some() {
            Some(
                self.node_service
                    .plan_rename(RenameNodeInput {
                        node_id: page.node_id.clone(),
                        title: input.title,
                        slug: input.slug,
                    })
                    .await?,
            )
        } else {
            None
        };

        let mut active: home_page::ActiveModel = page.into();
        if let Some(body) = input.body {
            active.body = Set(body);
        }
        let page = self.page_repo.update(active, node_move).await?;

        self.get(&page.id).await
    }

    /// Delete a home page along with every page below it.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let page = self.page_repo.get_by_id(id).await?;
        self.page_repo.delete(&page).await?;

        tracing::info!(page_id = %page.id, node_id = %page.node_id, "Deleted home page");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use moviecat_db::entities::{actor, movie};
    use moviecat_db::repositories::ContentNodeRepository;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_node(
        id: &str,
        parent_id: Option<&str>,
        slug: &str,
        url_path: &str,
    ) -> content_node::Model {
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

    fn create_test_page(id: &str, node_id: &str, body: &str) -> home_page::Model {
        home_page::Model {
            id: id.to_string(),
            node_id: node_id.to_string(),
            body: body.to_string(),
        }
    }

    fn service(db: MockDatabase) -> HomePageService {
        let db = Arc::new(db.into_connection());
        HomePageService::new(
            HomePageRepository::new(Arc::clone(&db)),
            ContentNodeService::new(ContentNodeRepository::new(db)),
        )
    }

    #[tokio::test]
    async fn test_create_at_root() {
        // conflict check, node insert, page insert
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<content_node::Model>::new()])
                .append_query_results([[create_test_node("n1", None, "home", "/home/")]])
                .append_query_results([[create_test_page("h1", "n1", "<p>Welcome</p>")]]),
        );

        let input = CreateHomePageInput {
            parent_id: None,
            title: "Home".to_string(),
            slug: None,
            body: "<p>Welcome</p>".to_string(),
        };
        let page = service.create(input).await.unwrap();

        assert_eq!(page.node.url_path, "/home/");
        assert_eq!(page.body, "<p>Welcome</p>");
    }

    #[tokio::test]
    async fn test_create_under_home_page_node() {
        // parent, no actor, no movie, conflict check, node insert, page insert
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_node("n1", None, "home", "/home/")]])
                .append_query_results([Vec::<actor::Model>::new()])
                .append_query_results([Vec::<movie::Model>::new()])
                .append_query_results([Vec::<content_node::Model>::new()])
                .append_query_results([[create_test_node(
                    "n2",
                    Some("n1"),
                    "about",
                    "/home/about/",
                )]])
                .append_query_results([[create_test_page("h2", "n2", "")]]),
        );

        let input = CreateHomePageInput {
            parent_id: Some("n1".to_string()),
            title: "About".to_string(),
            slug: None,
            body: String::new(),
        };
        let page = service.create(input).await.unwrap();

        assert_eq!(page.node.url_path, "/home/about/");
        assert_eq!(page.node.parent_id.as_deref(), Some("n1"));
    }

    #[tokio::test]
    async fn test_update_body_only_leaves_node() {
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_page("h1", "n1", "")]])
                .append_query_results([[create_test_page("h1", "n1", "<p>New</p>")]])
                .append_query_results([[(
                    create_test_page("h1", "n1", "<p>New</p>"),
                    create_test_node("n1", None, "home", "/home/"),
                )]]),
        );

        let input = UpdateHomePageInput {
            page_id: "h1".to_string(),
            title: None,
            slug: None,
            body: Some("<p>New</p>".to_string()),
        };
        let page = service.update(input).await.unwrap();

        assert_eq!(page.body, "<p>New</p>");
        assert_eq!(page.node.slug, "home");
    }

    #[tokio::test]
    async fn test_get_missing_page() {
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<(home_page::Model, content_node::Model)>::new()]),
        );

        assert!(matches!(
            service.get("missing").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_page("h1", "n1", "")]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }]),
        );

        assert!(service.delete("h1").await.is_ok());
    }
}
