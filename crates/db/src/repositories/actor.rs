//! Actor repository.

use std::sync::Arc;

use moviecat_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};

use super::content_node::{NodeMove, apply_move};
use crate::entities::{
    Actor, ContentNode, MovieActor, MovieDirector, actor, content_node, movie_actor,
    movie_director,
};

/// An actor together with its content node.
pub type ActorWithNode = (actor::Model, Option<content_node::Model>);

/// Actor repository for database operations.
#[derive(Clone)]
pub struct ActorRepository {
    db: Arc<DatabaseConnection>,
}

impl ActorRepository {
    /// Create a new actor repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an actor by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<actor::Model>> {
        Actor::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an actor by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<actor::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Actor: {id}")))
    }

    /// Find an actor and its node by actor ID.
    pub async fn find_with_node(&self, id: &str) -> AppResult<Option<ActorWithNode>> {
        Actor::find_by_id(id)
            .find_also_related(ContentNode)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find actors whose node has `slug`, at most `limit` of them.
    ///
    /// Slugs are only unique among siblings, so more than one page can match.
    pub async fn find_by_slug(&self, slug: &str, limit: u64) -> AppResult<Vec<ActorWithNode>> {
        Actor::find()
            .find_also_related(ContentNode)
            .filter(content_node::Column::Slug.eq(slug))
            .order_by_asc(content_node::Column::UrlPath)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an actor by the full URL path of its node.
    pub async fn find_by_url_path(&self, url_path: &str) -> AppResult<Option<ActorWithNode>> {
        Actor::find()
            .find_also_related(ContentNode)
            .filter(content_node::Column::UrlPath.eq(url_path))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find several actors at once.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<actor::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Actor::find()
            .filter(actor::Column::Id.is_in(ids.iter().map(String::as_str)))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List actors by title.
    pub async fn find_with_pagination(&self, limit: u64, offset: u64) -> AppResult<Vec<ActorWithNode>> {
        Actor::find()
            .find_also_related(ContentNode)
            .order_by_asc(content_node::Column::Title)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Cast of a movie.
    pub async fn find_cast(&self, movie_id: &str) -> AppResult<Vec<ActorWithNode>> {
        Actor::find()
            .inner_join(MovieActor)
            .filter(movie_actor::Column::MovieId.eq(movie_id))
            .find_also_related(ContentNode)
            .order_by_asc(content_node::Column::Title)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Directors of a movie.
    pub async fn find_directors(&self, movie_id: &str) -> AppResult<Vec<ActorWithNode>> {
        Actor::find()
            .inner_join(MovieDirector)
            .filter(movie_director::Column::MovieId.eq(movie_id))
            .find_also_related(ContentNode)
            .order_by_asc(content_node::Column::Title)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert an actor and the node it owns.
    pub async fn create(
        &self,
        node: content_node::ActiveModel,
        actor: actor::ActiveModel,
    ) -> AppResult<(actor::Model, content_node::Model)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let node = node
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let actor = actor
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok((actor, node))
    }

    /// Update an actor's own fields, moving its node in the same transaction.
    pub async fn update(
        &self,
        model: actor::ActiveModel,
        node_move: Option<NodeMove>,
    ) -> AppResult<actor::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if let Some(planned) = node_move {
            apply_move(&txn, planned).await?;
        }
        let actor = model
            .update(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(actor)
    }

    /// Delete an actor.
    ///
    /// Removes the owning node; the actor row and its cast/director links
    /// follow through cascades. Movies are left in place.
    pub async fn delete(&self, actor: &actor::Model) -> AppResult<()> {
        ContentNode::delete_by_id(actor.node_id.as_str())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Count movies an actor appears in and directs.
    pub async fn count_credits(&self, actor_id: &str) -> AppResult<(u64, u64)> {
        let acted = MovieActor::find()
            .filter(movie_actor::Column::ActorId.eq(actor_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let directed = MovieDirector::find()
            .filter(movie_director::Column::ActorId.eq(actor_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok((acted, directed))
    }
}
