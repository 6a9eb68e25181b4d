//! Movie repository.

use std::sync::Arc;

use moviecat_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::content_node::{NodeMove, apply_move};
use crate::entities::{
    ContentNode, Genre, Movie, MovieActor, MovieDirector, MovieGenre, content_node, genre, movie,
    movie_actor, movie_director, movie_genre,
};

/// A movie together with its content node.
pub type MovieWithNode = (movie::Model, Option<content_node::Model>);

/// Filters for listing movies.
#[derive(Debug, Clone, Default)]
pub struct MovieFilter {
    /// Only movies in this category.
    pub category_id: Option<String>,
    /// Only movies tagged with this genre.
    pub genre_id: Option<String>,
    /// Only movies released in this year.
    pub year: Option<i16>,
    /// Skip unpublished movies.
    pub live_only: bool,
}

/// Replacement relation sets for a movie.
///
/// `None` leaves the current set untouched; `Some(vec![])` clears it.
#[derive(Debug, Clone, Default)]
pub struct MovieRelations {
    /// Cast.
    pub actor_ids: Option<Vec<String>>,
    /// Directors.
    pub director_ids: Option<Vec<String>>,
    /// Genre tags.
    pub genre_ids: Option<Vec<String>>,
}

/// Movie repository for database operations.
#[derive(Clone)]
pub struct MovieRepository {
    db: Arc<DatabaseConnection>,
}

impl MovieRepository {
    /// Create a new movie repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a movie by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<movie::Model>> {
        Movie::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a movie by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<movie::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::MovieNotFound(id.to_string()))
    }

    /// Find a movie and its node by movie ID.
    pub async fn find_with_node(&self, id: &str) -> AppResult<Option<MovieWithNode>> {
        Movie::find_by_id(id)
            .find_also_related(ContentNode)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find movies whose node has `slug`, at most `limit` of them.
    ///
    /// Slugs are only unique among siblings, so more than one page can match.
    pub async fn find_by_slug(&self, slug: &str, limit: u64) -> AppResult<Vec<MovieWithNode>> {
        Movie::find()
            .find_also_related(ContentNode)
            .filter(content_node::Column::Slug.eq(slug))
            .order_by_asc(content_node::Column::UrlPath)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a movie by the full URL path of its node.
    pub async fn find_by_url_path(&self, url_path: &str) -> AppResult<Option<MovieWithNode>> {
        Movie::find()
            .find_also_related(ContentNode)
            .filter(content_node::Column::UrlPath.eq(url_path))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List movies matching `filter`, newest release first.
    pub async fn find_filtered(
        &self,
        filter: &MovieFilter,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<MovieWithNode>> {
        let mut query = Movie::find();

        if let Some(category_id) = &filter.category_id {
            query = query.filter(movie::Column::CategoryId.eq(category_id.as_str()));
        }
        if let Some(year) = filter.year {
            query = query.filter(movie::Column::Year.eq(year));
        }
        if let Some(genre_id) = &filter.genre_id {
            query = query
                .inner_join(MovieGenre)
                .filter(movie_genre::Column::GenreId.eq(genre_id.as_str()));
        }

        let mut query = query.find_also_related(ContentNode);
        if filter.live_only {
            query = query.filter(content_node::Column::Live.eq(true));
        }

        query
            .order_by_desc(movie::Column::Year)
            .order_by_asc(content_node::Column::Title)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Movies an actor appears in.
    pub async fn find_by_actor(&self, actor_id: &str) -> AppResult<Vec<MovieWithNode>> {
        Movie::find()
            .inner_join(MovieActor)
            .filter(movie_actor::Column::ActorId.eq(actor_id))
            .find_also_related(ContentNode)
            .order_by_desc(movie::Column::Year)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Movies an actor directed.
    pub async fn find_by_director(&self, actor_id: &str) -> AppResult<Vec<MovieWithNode>> {
        Movie::find()
            .inner_join(MovieDirector)
            .filter(movie_director::Column::ActorId.eq(actor_id))
            .find_also_related(ContentNode)
            .order_by_desc(movie::Column::Year)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Genres a movie is tagged with.
    pub async fn find_genres(&self, movie_id: &str) -> AppResult<Vec<genre::Model>> {
        Genre::find()
            .inner_join(MovieGenre)
            .filter(movie_genre::Column::MovieId.eq(movie_id))
            .order_by_asc(genre::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a movie, the node it owns, and its relation sets.
    pub async fn create(
        &self,
        node: content_node::ActiveModel,
        movie: movie::ActiveModel,
        relations: MovieRelations,
    ) -> AppResult<(movie::Model, content_node::Model)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let node = node
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let movie = movie
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        replace_relations(&txn, &movie.id, relations).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok((movie, node))
    }

    /// Update a movie's own fields and, optionally, move its node and
    /// replace its relation sets. All writes share one transaction.
    pub async fn update(
        &self,
        model: movie::ActiveModel,
        node_move: Option<NodeMove>,
        relations: MovieRelations,
    ) -> AppResult<movie::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if let Some(planned) = node_move {
            apply_move(&txn, planned).await?;
        }

        let movie = model
            .update(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        replace_relations(&txn, &movie.id, relations).await?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(movie)
    }

    /// Delete a movie.
    ///
    /// Removes the owning node; shots, ratings, reviews and relation rows
    /// follow through cascades.
    pub async fn delete(&self, movie: &movie::Model) -> AppResult<()> {
        ContentNode::delete_by_id(movie.node_id.as_str())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

async fn replace_relations<C: ConnectionTrait>(
    conn: &C,
    movie_id: &str,
    relations: MovieRelations,
) -> AppResult<()> {
    if let Some(actor_ids) = relations.actor_ids {
        MovieActor::delete_many()
            .filter(movie_actor::Column::MovieId.eq(movie_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        if !actor_ids.is_empty() {
            MovieActor::insert_many(actor_ids.into_iter().map(|actor_id| {
                movie_actor::ActiveModel {
                    movie_id: Set(movie_id.to_string()),
                    actor_id: Set(actor_id),
                }
            }))
            .exec_without_returning(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        }
    }

    if let Some(director_ids) = relations.director_ids {
        MovieDirector::delete_many()
            .filter(movie_director::Column::MovieId.eq(movie_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        if !director_ids.is_empty() {
            MovieDirector::insert_many(director_ids.into_iter().map(|actor_id| {
                movie_director::ActiveModel {
                    movie_id: Set(movie_id.to_string()),
                    actor_id: Set(actor_id),
                }
            }))
            .exec_without_returning(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        }
    }

    if let Some(genre_ids) = relations.genre_ids {
        MovieGenre::delete_many()
            .filter(movie_genre::Column::MovieId.eq(movie_id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        if !genre_ids.is_empty() {
            MovieGenre::insert_many(genre_ids.into_iter().map(|genre_id| {
                movie_genre::ActiveModel {
                    movie_id: Set(movie_id.to_string()),
                    genre_id: Set(genre_id),
                }
            }))
            .exec_without_returning(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_node(id: &str, slug: &str) -> content_node::Model {
        content_node::Model {
            id: id.to_string(),
            parent_id: Some("movies".to_string()),
            slug: slug.to_string(),
            title: slug.to_string(),
            url_path: format!("/movies/{slug}/"),
            live: true,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_movie(id: &str, node_id: &str) -> movie::Model {
        movie::Model {
            id: id.to_string(),
            node_id: node_id.to_string(),
            tagline: "Free your mind".to_string(),
            description: String::new(),
            image_id: None,
            year: 1999,
            country: "USA".to_string(),
            world_premiere: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
            budget: 63_000_000,
            fees_in_usa: 171_000_000,
            fees_in_world: 467_000_000,
            category_id: None,
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<movie::Model>::new()])
                .into_connection(),
        );

        let repo = MovieRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::MovieNotFound(id)) if id == "missing"));
    }

    #[tokio::test]
    async fn test_find_filtered() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[(
                    create_test_movie("m1", "n1"),
                    create_test_node("n1", "the-matrix"),
                )]])
                .into_connection(),
        );

        let repo = MovieRepository::new(db);
        let filter = MovieFilter {
            genre_id: Some("g1".to_string()),
            year: Some(1999),
            live_only: true,
            ..Default::default()
        };
        let result = repo.find_filtered(&filter, 10, 0).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].0.year, 1999);
    }

    #[tokio::test]
    async fn test_update_replaces_only_given_sets() {
        let movie = create_test_movie("m1", "n1");

        // update RETURNING, then delete + insert for the cast only
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[movie.clone()]])
                .append_exec_results([exec(2), exec(1)])
                .into_connection(),
        );

        let repo = MovieRepository::new(db);
        let mut active: movie::ActiveModel = movie.into();
        active.tagline = Set("Welcome to the real world".to_string());
        let relations = MovieRelations {
            actor_ids: Some(vec!["a1".to_string()]),
            ..Default::default()
        };
        let result = repo.update(active, None, relations).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_moves_node_with_movie() {
        let movie = create_test_movie("m1", "n1");
        let node = create_test_node("n1", "matrix");
        let moved = create_test_node("n1", "the-matrix");

        // descendants lookup, node update, movie update
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<content_node::Model>::new()])
                .append_query_results([[moved]])
                .append_query_results([[movie.clone()]])
                .into_connection(),
        );

        let repo = MovieRepository::new(db);
        let planned = NodeMove {
            node,
            title: "The Matrix".to_string(),
            slug: "the-matrix".to_string(),
            url_path: "/movies/the-matrix/".to_string(),
        };
        let mut active: movie::ActiveModel = movie.into();
        active.year = Set(1999);
        let result = repo
            .update(active, Some(planned), MovieRelations::default())
            .await
            .unwrap();

        assert_eq!(result.id, "m1");
    }

    #[tokio::test]
    async fn test_create_with_empty_sets_skips_inserts() {
        let node = create_test_node("n1", "the-matrix");
        let movie = create_test_movie("m1", "n1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[node.clone()]])
                .append_query_results([[movie.clone()]])
                .append_exec_results([exec(0), exec(0), exec(0)])
                .into_connection(),
        );

        let repo = MovieRepository::new(db);
        let relations = MovieRelations {
            actor_ids: Some(Vec::new()),
            director_ids: Some(Vec::new()),
            genre_ids: Some(Vec::new()),
        };
        let (created, created_node) = repo
            .create(node.into(), movie.into(), relations)
            .await
            .unwrap();

        assert_eq!(created.node_id, created_node.id);
    }
}
