//! Movie service.

use chrono::{NaiveDate, Utc};
use moviecat_common::{AppError, AppResult, IdGenerator};
use moviecat_db::entities::{content_node, movie};
use moviecat_db::repositories::{
    ActorRepository, CategoryRepository, GalleryRepository, GenreRepository, ImageRepository,
    MovieFilter, MovieRelations, MovieRepository, ReviewRepository,
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::actor::ActorResponse;
use super::category::CategoryResponse;
use super::content_node::{ContentNodeService, NodeResponse, RenameNodeInput, normalize_path};
use super::gallery::ShotResponse;
use super::genre::GenreResponse;
use super::input::{dedup_ids, double_option, page_limit};
use super::rating::{RatingService, RatingSummary};
use super::review::ReviewResponse;

const fn default_year() -> i16 {
    movie::DEFAULT_YEAR
}

const fn default_true() -> bool {
    true
}

/// Input for creating a movie.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieInput {
    /// Node the movie's page is placed under.
    pub parent_id: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub slug: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    pub image_id: Option<String>,
    #[serde(default = "default_year")]
    #[validate(range(min = 0))]
    pub year: i16,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub country: String,
    /// Defaults to today.
    pub world_premiere: Option<NaiveDate>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub budget: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub fees_in_usa: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub fees_in_world: i64,
    pub category_id: Option<String>,
    #[serde(default)]
    pub actor_ids: Vec<String>,
    #[serde(default)]
    pub director_ids: Vec<String>,
    #[serde(default)]
    pub genre_ids: Vec<String>,
}

/// Input for updating a movie.
///
/// Relation lists replace the current set when given.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieInput {
    pub movie_id: String,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 100))]
    pub tagline: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_id: Option<Option<String>>,
    #[validate(range(min = 0))]
    pub year: Option<i16>,
    #[validate(length(max = 30))]
    pub country: Option<String>,
    pub world_premiere: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub budget: Option<i64>,
    #[validate(range(min = 0))]
    pub fees_in_usa: Option<i64>,
    #[validate(range(min = 0))]
    pub fees_in_world: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<String>>,
    pub actor_ids: Option<Vec<String>>,
    pub director_ids: Option<Vec<String>>,
    pub genre_ids: Option<Vec<String>>,
}

/// Input for listing movies.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListMoviesInput {
    pub category_id: Option<String>,
    pub genre_id: Option<String>,
    pub year: Option<i16>,
    #[serde(default = "default_true")]
    pub live_only: bool,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Response for a movie.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: String,
    pub node: NodeResponse,
    pub tagline: String,
    pub description: String,
    pub image_id: Option<String>,
    pub year: i16,
    pub country: String,
    pub world_premiere: NaiveDate,
    pub budget: i64,
    pub fees_in_usa: i64,
    pub fees_in_world: i64,
    pub category_id: Option<String>,
}

impl MovieResponse {
    /// Combine a movie with its node.
    pub fn from_parts(movie: movie::Model, node: Option<content_node::Model>) -> AppResult<Self> {
        let node = node.ok_or_else(|| {
            AppError::Internal(format!("Movie {} has no content node", movie.id))
        })?;

        Ok(Self {
            id: movie.id,
            node: node.into(),
            tagline: movie.tagline,
            description: movie.description,
            image_id: movie.image_id,
            year: movie.year,
            country: movie.country,
            world_premiere: movie.world_premiere,
            budget: movie.budget,
            fees_in_usa: movie.fees_in_usa,
            fees_in_world: movie.fees_in_world,
            category_id: movie.category_id,
        })
    }
}

/// Everything shown on a movie page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetailResponse {
    #[serde(flatten)]
    pub movie: MovieResponse,
    pub category: Option<CategoryResponse>,
    pub genres: Vec<GenreResponse>,
    pub actors: Vec<ActorResponse>,
    pub directors: Vec<ActorResponse>,
    pub shots: Vec<ShotResponse>,
    /// Top-level reviews only; replies are fetched per review.
    pub reviews: Vec<ReviewResponse>,
    pub rating: RatingSummary,
}

/// Repositories the movie service reads from.
#[derive(Clone)]
pub struct MovieRepositories {
    pub movie: MovieRepository,
    pub actor: ActorRepository,
    pub genre: GenreRepository,
    pub category: CategoryRepository,
    pub image: ImageRepository,
    pub gallery: GalleryRepository,
    pub review: ReviewRepository,
}

/// Service for movies.
#[derive(Clone)]
pub struct MovieService {
    repos: MovieRepositories,
    node_service: ContentNodeService,
    rating_service: RatingService,
    id_gen: IdGenerator,
}

impl MovieService {
    /// Create a new movie service.
    #[must_use]
    pub const fn new(
        repos: MovieRepositories,
        node_service: ContentNodeService,
        rating_service: RatingService,
    ) -> Self {
        Self {
            repos,
            node_service,
            rating_service,
            id_gen: IdGenerator::new(),
        }
    }

    /// Check that referenced records exist, returning deduplicated ID lists.
    async fn check_relations(&self, relations: MovieRelations) -> AppResult<MovieRelations> {
        let actor_ids = match relations.actor_ids {
            Some(ids) => Some(self.check_actors(dedup_ids(ids), "actor").await?),
            None => None,
        };
        let director_ids = match relations.director_ids {
            Some(ids) => Some(self.check_actors(dedup_ids(ids), "director").await?),
            None => None,
        };
        let genre_ids = match relations.genre_ids {
            Some(ids) => {
                let ids = dedup_ids(ids);
                let found = self.repos.genre.find_by_ids(&ids).await?;
                if found.len() != ids.len() {
                    return Err(AppError::Validation("Unknown genre in list".to_string()));
                }
                Some(ids)
            }
            None => None,
        };

        Ok(MovieRelations {
            actor_ids,
            director_ids,
            genre_ids,
        })
    }

    async fn check_actors(&self, ids: Vec<String>, role: &str) -> AppResult<Vec<String>> {
        let found = self.repos.actor.find_by_ids(&ids).await?;
        if found.len() != ids.len() {
            return Err(AppError::Validation(format!("Unknown {role} in list")));
        }
        Ok(ids)
    }

    async fn check_refs(&self, image_id: Option<&str>, category_id: Option<&str>) -> AppResult<()> {
        if let Some(image_id) = image_id {
            if self.repos.image.find_by_id(image_id).await?.is_none() {
                return Err(AppError::Validation(format!("Unknown image: {image_id}")));
            }
        }
        if let Some(category_id) = category_id {
            if self.repos.category.find_by_id(category_id).await?.is_none() {
                return Err(AppError::Validation(format!(
                    "Unknown category: {category_id}"
                )));
            }
        }
        Ok(())
    }

    /// Create a movie with its page node and credits.
    pub async fn create(&self, input: CreateMovieInput) -> AppResult<MovieDetailResponse> {
        input.validate()?;

        self.check_refs(input.image_id.as_deref(), input.category_id.as_deref())
            .await?;
        let relations = self
            .check_relations(MovieRelations {
                actor_ids: Some(input.actor_ids),
                director_ids: Some(input.director_ids),
                genre_ids: Some(input.genre_ids),
            })
            .await?;

        let new_node = self
            .node_service
            .prepare(input.parent_id.as_deref(), &input.title, input.slug.as_deref())
            .await?;
        let model = movie::ActiveModel {
            id: Set(self.id_gen.generate()),
            node_id: Set(new_node.id),
            tagline: Set(input.tagline),
            description: Set(input.description),
            image_id: Set(input.image_id),
            year: Set(input.year),
            country: Set(input.country),
            world_premiere: Set(input
                .world_premiere
                .unwrap_or_else(|| Utc::now().date_naive())),
            budget: Set(input.budget),
            fees_in_usa: Set(input.fees_in_usa),
            fees_in_world: Set(input.fees_in_world),
            category_id: Set(input.category_id),
        };

        let (movie, node) = self
            .repos
            .movie
            .create(new_node.model, model, relations)
            .await?;

        tracing::info!(movie_id = %movie.id, url_path = %node.url_path, "Created movie");

        self.detail(&movie.id).await
    }

    /// Movie page contents by movie ID.
    pub async fn detail(&self, id: &str) -> AppResult<MovieDetailResponse> {
        let (movie, node) = self
            .repos
            .movie
            .find_with_node(id)
            .await?
            .ok_or_else(|| AppError::MovieNotFound(id.to_string()))?;
        self.assemble(movie, node).await
    }

    /// Movie page contents by page slug.
    ///
    /// Fails with `Conflict` when pages under different parents share the
    /// slug; use [`Self::detail_by_path`] for those.
    pub async fn detail_by_slug(&self, slug: &str) -> AppResult<MovieDetailResponse> {
        let mut found = self.repos.movie.find_by_slug(slug, 2).await?;
        if found.len() > 1 {
            return Err(AppError::Conflict(format!(
                "Slug {slug} matches several movies; look it up by path"
            )));
        }
        let (movie, node) = found
            .pop()
            .ok_or_else(|| AppError::MovieNotFound(slug.to_string()))?;
        self.assemble(movie, node).await
    }

    /// Movie page contents by public URL path.
    pub async fn detail_by_path(&self, path: &str) -> AppResult<MovieDetailResponse> {
        let url_path = normalize_path(path);
        let (movie, node) = self
            .repos
            .movie
            .find_by_url_path(&url_path)
            .await?
            .ok_or_else(|| AppError::MovieNotFound(url_path.clone()))?;
        self.assemble(movie, node).await
    }

    async fn assemble(
        &self,
        movie: movie::Model,
        node: Option<content_node::Model>,
    ) -> AppResult<MovieDetailResponse> {
        let category = async {
            match movie.category_id.as_deref() {
                Some(category_id) => self.repos.category.find_by_id(category_id).await,
                None => Ok(None),
            }
        };

        let (category, genres, actors, directors, shots, reviews, rating) = tokio::try_join!(
            category,
            self.repos.movie.find_genres(&movie.id),
            self.repos.actor.find_cast(&movie.id),
            self.repos.actor.find_directors(&movie.id),
            self.repos.gallery.find_by_movie(&movie.id),
            self.repos.review.find_top_level(&movie.id),
            self.rating_service.summary_unchecked(&movie.id),
        )?;

        Ok(MovieDetailResponse {
            movie: MovieResponse::from_parts(movie, node)?,
            category: category.map(Into::into),
            genres: genres.into_iter().map(Into::into).collect(),
            actors: actors
                .into_iter()
                .map(|(actor, node)| ActorResponse::from_parts(actor, node))
                .collect::<AppResult<_>>()?,
            directors: directors
                .into_iter()
                .map(|(actor, node)| ActorResponse::from_parts(actor, node))
                .collect::<AppResult<_>>()?,
            shots: shots.into_iter().map(Into::into).collect(),
            reviews: reviews.into_iter().map(Into::into).collect(),
            rating,
        })
    }

    /// List movies, newest release first.
    pub async fn list(&self, input: ListMoviesInput) -> AppResult<Vec<MovieResponse>> {
        input.validate()?;

        let filter = MovieFilter {
            category_id: input.category_id,
            genre_id: input.genre_id,
            year: input.year,
            live_only: input.live_only,
        };
        self.repos
            .movie
            .find_filtered(&filter, page_limit(input.limit), input.offset.unwrap_or(0))
            .await?
            .into_iter()
            .map(|(movie, node)| MovieResponse::from_parts(movie, node))
            .collect()
    }

    /// Update a movie.
    pub async fn update(&self, input: UpdateMovieInput) -> AppResult<MovieDetailResponse> {
        input.validate()?;

        let movie = self.repos.movie.get_by_id(&input.movie_id).await?;

        self.check_refs(
            input.image_id.as_ref().and_then(Option::as_deref),
            input.category_id.as_ref().and_then(Option::as_deref),
        )
        .await?;
        let relations = self
            .check_relations(MovieRelations {
                actor_ids: input.actor_ids,
                director_ids: input.director_ids,
                genre_ids: input.genre_ids,
            })
            .await?;

        let node_move = if input.title.is_some() || input.slug.is_some() {
            Some(
                self.node_service
                    .plan_rename(RenameNodeInput {
                        node_id: movie.node_id.clone(),
                        title: input.title,
                        slug: input.slug,
                    })
                    .await?,
            )
        } else {
            None
        };

        let mut active: movie::ActiveModel = movie.into();
        if let Some(tagline) = input.tagline {
            active.tagline = Set(tagline);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(image_id) = input.image_id {
            active.image_id = Set(image_id);
        }
        if let Some(year) = input.year {
            active.year = Set(year);
        }
        if let Some(country) = input.country {
            active.country = Set(country);
        }
        if let Some(world_premiere) = input.world_premiere {
            active.world_premiere = Set(world_premiere);
        }
        if let Some(budget) = input.budget {
            active.budget = Set(budget);
        }
        if let Some(fees_in_usa) = input.fees_in_usa {
            active.fees_in_usa = Set(fees_in_usa);
        }
        if let Some(fees_in_world) = input.fees_in_world {
            active.fees_in_world = Set(fees_in_world);
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }

        let movie = self.repos.movie.update(active, node_move, relations).await?;

        tracing::info!(movie_id = %movie.id, "Updated movie");

        self.detail(&movie.id).await
    }

    /// Delete a movie with its page, gallery, votes and reviews.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let movie = self.repos.movie.get_by_id(id).await?;
        self.repos.movie.delete(&movie).await?;

        tracing::info!(movie_id = %movie.id, "Deleted movie");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviecat_db::entities::{actor, category, genre, movie_shot, rating_star, review};
    use moviecat_db::repositories::{ContentNodeRepository, RatingRepository};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn create_test_node(id: &str, slug: &str) -> content_node::Model {
        content_node::Model {
            id: id.to_string(),
            parent_id: None,
            slug: slug.to_string(),
            title: slug.to_string(),
            url_path: format!("/{slug}/"),
            live: true,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_movie(id: &str, node_id: &str, category_id: Option<&str>) -> movie::Model {
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
            fees_in_usa: 0,
            fees_in_world: 0,
            category_id: category_id.map(ToString::to_string),
        }
    }

    fn service(db: MockDatabase) -> MovieService {
        let db: Arc<DatabaseConnection> = Arc::new(db.into_connection());
        let repos = MovieRepositories {
            movie: MovieRepository::new(Arc::clone(&db)),
            actor: ActorRepository::new(Arc::clone(&db)),
            genre: GenreRepository::new(Arc::clone(&db)),
            category: CategoryRepository::new(Arc::clone(&db)),
            image: ImageRepository::new(Arc::clone(&db)),
            gallery: GalleryRepository::new(Arc::clone(&db)),
            review: ReviewRepository::new(Arc::clone(&db)),
        };
        MovieService::new(
            repos,
            ContentNodeService::new(ContentNodeRepository::new(Arc::clone(&db))),
            RatingService::new(RatingRepository::new(Arc::clone(&db)), MovieRepository::new(db)),
        )
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<(movie::Model, content_node::Model)>::new()]),
        );

        assert!(matches!(
            service.detail("missing").await,
            Err(AppError::MovieNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_detail_by_shared_slug_is_ambiguous() {
        let mut other_node = create_test_node("n2", "heat");
        other_node.url_path = "/classics/heat/".to_string();

        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![
                (create_test_movie("m1", "n1", None), create_test_node("n1", "heat")),
                (create_test_movie("m2", "n2", None), other_node),
            ]]),
        );

        assert!(matches!(
            service.detail_by_slug("heat").await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_update_slug_conflict_stops_before_writing() {
        let movie = create_test_movie("m1", "n1", None);

        // movie, its node, then the taken path
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[movie]])
                .append_query_results([[create_test_node("n1", "heat")]])
                .append_query_results([[create_test_node("n9", "heat-1995")]]),
        );

        let input: UpdateMovieInput = serde_json::from_value(serde_json::json!({
            "movieId": "m1",
            "slug": "heat-1995",
        }))
        .unwrap();

        assert!(matches!(
            service.update(input).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_detail_assembles_page() {
        let review = review::Model {
            id: "r1".to_string(),
            movie_id: "m1".to_string(),
            parent_id: None,
            email: "viewer@example.com".to_string(),
            name: "Viewer".to_string(),
            text: "Mind-bending".to_string(),
            sort_order: Some(0),
            created_at: Utc::now().into(),
        };

        // Queries run in the order the detail page is assembled
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[(
                    create_test_movie("m1", "n1", Some("c1")),
                    create_test_node("n1", "the-matrix"),
                )]])
                .append_query_results([[category::Model {
                    id: "c1".to_string(),
                    name: "Feature".to_string(),
                    description: String::new(),
                }]])
                .append_query_results([[genre::Model {
                    id: "g1".to_string(),
                    name: "Sci-Fi".to_string(),
                    description: String::new(),
                }]])
                .append_query_results([[(
                    actor::Model {
                        id: "a1".to_string(),
                        node_id: "n2".to_string(),
                        age: 58,
                        description: String::new(),
                        image_id: None,
                    },
                    create_test_node("n2", "keanu-reeves"),
                )]])
                .append_query_results([Vec::<(actor::Model, content_node::Model)>::new()])
                .append_query_results([Vec::<movie_shot::Model>::new()])
                .append_query_results([[review]])
                .append_query_results([[rating_star::Model {
                    id: "s5".to_string(),
                    value: 5,
                    sort_order: None,
                }]])
                .append_query_results([[maplit::btreemap! {
                    "star_id" => sea_orm::Value::from("s5"),
                    "votes" => sea_orm::Value::from(2i64),
                }]]),
        );

        let detail = service.detail("m1").await.unwrap();

        assert_eq!(detail.movie.node.slug, "the-matrix");
        assert_eq!(detail.category.unwrap().name, "Feature");
        assert_eq!(detail.genres.len(), 1);
        assert_eq!(detail.actors[0].node.slug, "keanu-reeves");
        assert!(detail.directors.is_empty());
        assert_eq!(detail.reviews.len(), 1);
        assert_eq!(detail.rating.votes, 2);
        assert_eq!(detail.rating.average, Some(5.0));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_actor() {
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<actor::Model>::new()]),
        );

        let input = CreateMovieInput {
            parent_id: None,
            title: "The Matrix".to_string(),
            slug: None,
            tagline: String::new(),
            description: String::new(),
            image_id: None,
            year: 1999,
            country: "USA".to_string(),
            world_premiere: None,
            budget: 0,
            fees_in_usa: 0,
            fees_in_world: 0,
            category_id: None,
            actor_ids: vec!["ghost".to_string()],
            director_ids: Vec::new(),
            genre_ids: Vec::new(),
        };

        assert!(matches!(
            service.create(input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_budget() {
        let service = service(MockDatabase::new(DatabaseBackend::Postgres));

        let input: CreateMovieInput = serde_json::from_value(serde_json::json!({
            "title": "Heat",
            "budget": -5,
        }))
        .unwrap();
        assert_eq!(input.year, movie::DEFAULT_YEAR);

        assert!(matches!(
            service.create(input).await,
            Err(AppError::Validation(_))
        ));
    }
}
