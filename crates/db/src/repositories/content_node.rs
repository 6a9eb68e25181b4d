//! Content node repository.

use std::sync::Arc;

use chrono::Utc;
use moviecat_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entities::{Actor, ContentNode, Movie, actor, content_node, movie};

/// A checked change to a node's title and slug, not yet written.
#[derive(Debug, Clone)]
pub struct NodeMove {
    /// Node as currently stored.
    pub node: content_node::Model,
    pub title: String,
    pub slug: String,
    /// Path the node moves to.
    pub url_path: String,
}

/// Content node repository for database operations.
#[derive(Clone)]
pub struct ContentNodeRepository {
    db: Arc<DatabaseConnection>,
}

impl ContentNodeRepository {
    /// Create a new content node repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a node by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<content_node::Model>> {
        ContentNode::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a node by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<content_node::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Content node: {id}")))
    }

    /// Find a node by its full URL path.
    pub async fn find_by_url_path(&self, url_path: &str) -> AppResult<Option<content_node::Model>> {
        ContentNode::find()
            .filter(content_node::Column::UrlPath.eq(url_path))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the direct children of a node (or the top-level nodes).
    pub async fn find_children(&self, parent_id: Option<&str>) -> AppResult<Vec<content_node::Model>> {
        let query = match parent_id {
            Some(parent_id) => {
                ContentNode::find().filter(content_node::Column::ParentId.eq(parent_id))
            }
            None => ContentNode::find().filter(content_node::Column::ParentId.is_null()),
        };

        query
            .order_by_asc(content_node::Column::Title)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Whether a movie or an actor owns this node.
    pub async fn is_catalog_page(&self, id: &str) -> AppResult<bool> {
        let actor = Actor::find()
            .filter(actor::Column::NodeId.eq(id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        if actor.is_some() {
            return Ok(true);
        }

        let movie = Movie::find()
            .filter(movie::Column::NodeId.eq(id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(movie.is_some())
    }

    /// Insert a node on its own (nodes owned by a movie, actor or home
    /// page are inserted by that repository instead).
    pub async fn create(&self, model: content_node::ActiveModel) -> AppResult<content_node::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Publish or unpublish a node.
    pub async fn set_live(&self, id: &str, live: bool) -> AppResult<content_node::Model> {
        let node = self.get_by_id(id).await?;
        let mut active: content_node::ActiveModel = node.into();
        active.live = Set(live);
        active.updated_at = Set(Some(Utc::now().into()));
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Apply a node move in its own transaction.
    pub async fn relocate(&self, planned: NodeMove) -> AppResult<content_node::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let updated = apply_move(&txn, planned).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(updated)
    }

    /// Delete a node, its descendants, and any movie or actor owning them.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        ContentNode::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

/// Change a node's title and slug and rewrite every descendant's path.
///
/// Runs on the caller's connection so owners can move their node in the
/// same transaction as their own update.
pub(crate) async fn apply_move<C: ConnectionTrait>(
    conn: &C,
    planned: NodeMove,
) -> AppResult<content_node::Model> {
    let NodeMove {
        node,
        title,
        slug,
        url_path,
    } = planned;

    let old_path = node.url_path.clone();
    let descendants = if old_path == url_path {
        Vec::new()
    } else {
        ContentNode::find()
            .filter(content_node::Column::UrlPath.starts_with(old_path.as_str()))
            .filter(content_node::Column::Id.ne(node.id.as_str()))
            .all(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
    };

    let now = Utc::now();
    let mut active: content_node::ActiveModel = node.into();
    active.title = Set(title);
    active.slug = Set(slug);
    active.url_path = Set(url_path.clone());
    active.updated_at = Set(Some(now.into()));
    let updated = active
        .update(conn)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    for descendant in descendants {
        // LIKE treats `_` as a wildcard, so re-check the prefix
        let Some(rest) = descendant.url_path.strip_prefix(old_path.as_str()) else {
            continue;
        };
        let new_path = format!("{url_path}{rest}");
        let mut active: content_node::ActiveModel = descendant.into();
        active.url_path = Set(new_path);
        active.updated_at = Set(Some(now.into()));
        active
            .update(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    Ok(updated)
}
