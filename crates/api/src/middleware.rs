//! API middleware.

#![allow(missing_docs)]

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRef, State},
    http::{Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use moviecat_common::{AppError, SiteConfig};
use moviecat_core::{
    ActorService, CategoryService, ContentNodeService, GalleryService, GenreService,
    HomePageService, ImageService, MovieRepositories, MovieService, RatingService, ReviewService,
};
use moviecat_db::repositories::{
    ActorRepository, CategoryRepository, ContentNodeRepository, GalleryRepository,
    GenreRepository, HomePageRepository, ImageRepository, MovieRepository, RatingRepository,
    ReviewRepository,
};
use sea_orm::DatabaseConnection;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
    pub node_service: ContentNodeService,
    pub home_page_service: HomePageService,
    pub genre_service: GenreService,
    pub category_service: CategoryService,
    pub image_service: ImageService,
    pub actor_service: ActorService,
    pub movie_service: MovieService,
    pub gallery_service: GalleryService,
    pub rating_service: RatingService,
    pub review_service: ReviewService,
}

impl AppState {
    /// Wire every service to one connection pool.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, site: SiteConfig) -> Self {
        let node_repo = ContentNodeRepository::new(Arc::clone(&db));
        let home_page_repo = HomePageRepository::new(Arc::clone(&db));
        let genre_repo = GenreRepository::new(Arc::clone(&db));
        let category_repo = CategoryRepository::new(Arc::clone(&db));
        let image_repo = ImageRepository::new(Arc::clone(&db));
        let actor_repo = ActorRepository::new(Arc::clone(&db));
        let movie_repo = MovieRepository::new(Arc::clone(&db));
        let gallery_repo = GalleryRepository::new(Arc::clone(&db));
        let rating_repo = RatingRepository::new(Arc::clone(&db));
        let review_repo = ReviewRepository::new(db);

        let node_service = ContentNodeService::new(node_repo);
        let rating_service = RatingService::new(rating_repo, movie_repo.clone());
        let movie_service = MovieService::new(
            MovieRepositories {
                movie: movie_repo.clone(),
                actor: actor_repo.clone(),
                genre: genre_repo.clone(),
                category: category_repo.clone(),
                image: image_repo.clone(),
                gallery: gallery_repo.clone(),
                review: review_repo.clone(),
            },
            node_service.clone(),
            rating_service.clone(),
        );

        Self {
            site: Arc::new(site),
            actor_service: ActorService::new(
                actor_repo,
                movie_repo.clone(),
                image_repo.clone(),
                node_service.clone(),
            ),
            gallery_service: GalleryService::new(gallery_repo, movie_repo.clone(), image_repo.clone()),
            review_service: ReviewService::new(review_repo, movie_repo),
            home_page_service: HomePageService::new(home_page_repo, node_service.clone()),
            genre_service: GenreService::new(genre_repo),
            category_service: CategoryService::new(category_repo),
            image_service: ImageService::new(image_repo),
            node_service,
            movie_service,
            rating_service,
        }
    }
}

impl FromRef<AppState> for Arc<SiteConfig> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.site)
    }
}

/// Reject requests whose `Host` header is not in the site allow-list.
pub async fn allowed_hosts_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().authority().map(|a| a.as_str()))
        .unwrap_or_default();

    if !state.site.is_host_allowed(host) {
        tracing::warn!(host = %host, "Rejected request for disallowed host");
        return AppError::BadRequest(format!("Invalid Host header: {host}")).into_response();
    }

    next.run(req).await
}
