//! Home page repository.

use std::sync::Arc;

use moviecat_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};

use super::content_node::{NodeMove, apply_move};
use crate::entities::{ContentNode, HomePage, content_node, home_page};

/// A home page together with its content node.
pub type HomePageWithNode = (home_page::Model, Option<content_node::Model>);

/// Home page repository for database operations.
#[derive(Clone)]
pub struct HomePageRepository {
    db: Arc<DatabaseConnection>,
}

impl HomePageRepository {
    /// Create a new home page repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a home page by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<home_page::Model>> {
        HomePage::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a home page by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<home_page::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Home page: {id}")))
    }

    /// Find a home page and its node by page ID.
    pub async fn find_with_node(&self, id: &str) -> AppResult<Option<HomePageWithNode>> {
        HomePage::find_by_id(id)
            .find_also_related(ContentNode)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a home page by the full URL path of its node.
    pub async fn find_by_url_path(&self, url_path: &str) -> AppResult<Option<HomePageWithNode>> {
        HomePage::find()
            .find_also_related(ContentNode)
            .filter(content_node::Column::UrlPath.eq(url_path))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List home pages by path.
    pub async fn find_with_pagination(
        &self,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<HomePageWithNode>> {
        HomePage::find()
            .find_also_related(ContentNode)
            .order_by_asc(content_node::Column::UrlPath)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a home page and the node it owns.
    pub async fn create(
        &self,
        node: content_node::ActiveModel,
        page: home_page::ActiveModel,
    ) -> AppResult<(home_page::Model, content_node::Model)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let node = node
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let page = page
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok((page, node))
    }

    /// Update a home page body, moving its node in the same transaction.
    pub async fn update(
        &self,
        model: home_page::ActiveModel,
        node_move: Option<NodeMove>,
    ) -> AppResult<home_page::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if let Some(planned) = node_move {
            apply_move(&txn, planned).await?;
        }
        let page = model
            .update(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(page)
    }

    /// Delete a home page.
    ///
    /// Removes the owning node, so every page below it goes too.
    pub async fn delete(&self, page: &home_page::Model) -> AppResult<()> {
        ContentNode::delete_by_id(page.node_id.as_str())
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
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn create_test_node(id: &str, slug: &str, url_path: &str) -> content_node::Model {
        content_node::Model {
            id: id.to_string(),
            parent_id: None,
            slug: slug.to_string(),
            title: "Home".to_string(),
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

    #[tokio::test]
    async fn test_create_inserts_node_then_page() {
        let node = create_test_node("n1", "home", "/home/");
        let page = create_test_page("h1", "n1", "<p>Welcome</p>");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[node.clone()]])
                .append_query_results([[page.clone()]])
                .into_connection(),
        );

        let repo = HomePageRepository::new(db);
        let page_model = home_page::ActiveModel {
            id: Set("h1".to_string()),
            node_id: Set("n1".to_string()),
            body: Set("<p>Welcome</p>".to_string()),
        };
        let (created, created_node) = repo.create(node.into(), page_model).await.unwrap();

        assert_eq!(created.node_id, created_node.id);
        assert_eq!(created.body, "<p>Welcome</p>");
    }

    #[tokio::test]
    async fn test_find_by_url_path() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[(
                    create_test_page("h1", "n1", ""),
                    create_test_node("n1", "home", "/home/"),
                )]])
                .into_connection(),
        );

        let repo = HomePageRepository::new(db);
        let (page, node) = repo.find_by_url_path("/home/").await.unwrap().unwrap();

        assert_eq!(page.id, "h1");
        assert_eq!(node.unwrap().url_path, "/home/");
    }

    #[tokio::test]
    async fn test_update_moves_node_with_page() {
        let node = create_test_node("n1", "home", "/home/");
        let mut moved = node.clone();
        moved.slug = "welcome".to_string();
        moved.url_path = "/welcome/".to_string();
        let page = create_test_page("h1", "n1", "<p>Hi</p>");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<content_node::Model>::new()])
                .append_query_results([[moved]])
                .append_query_results([[page.clone()]])
                .into_connection(),
        );

        let repo = HomePageRepository::new(db);
        let mut active: home_page::ActiveModel = create_test_page("h1", "n1", "").into();
        active.body = Set("<p>Hi</p>".to_string());
        let planned = NodeMove {
            node,
            title: "Home".to_string(),
            slug: "welcome".to_string(),
            url_path: "/welcome/".to_string(),
        };
        let updated = repo.update(active, Some(planned)).await.unwrap();

        assert_eq!(updated.body, "<p>Hi</p>");
    }

    #[tokio::test]
    async fn test_delete_removes_node() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = HomePageRepository::new(db);
        let result = repo.delete(&create_test_page("h1", "n1", "")).await;

        assert!(result.is_ok());
    }
}
