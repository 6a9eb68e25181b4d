//! API endpoints.

mod actors;
mod categories;
mod gallery;
mod genres;
mod home_pages;
mod images;
mod movies;
mod nodes;
mod ratings;
mod reviews;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/nodes", nodes::router())
        .nest("/home-pages", home_pages::router())
        .nest("/genres", genres::router())
        .nest("/categories", categories::router())
        .nest("/images", images::router())
        .nest("/actors", actors::router())
        .nest("/movies", movies::router())
        .nest("/gallery", gallery::router())
        .nest("/ratings", ratings::router())
        .nest("/reviews", reviews::router())
}
