//! Movie endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use moviecat_common::{AppError, AppResult};
use moviecat_core::{
    CreateMovieInput, ListMoviesInput, MovieDetailResponse, MovieResponse, UpdateMovieInput,
};
use serde::Deserialize;

use crate::{
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Request naming a movie.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieIdRequest {
    pub movie_id: String,
}

/// Request to show a movie page by ID, URL path or slug.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowMovieRequest {
    #[serde(default)]
    pub movie_id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    /// Public URL path, e.g. `/movies/heat/`.
    #[serde(default)]
    pub path: Option<String>,
}

async fn create_movie(
    State(state): State<AppState>,
    Json(input): Json<CreateMovieInput>,
) -> AppResult<ApiResponse<MovieDetailResponse>> {
    let movie = state.movie_service.create(input).await?;
    Ok(ApiResponse::ok(movie))
}

async fn list_movies(
    State(state): State<AppState>,
    Json(input): Json<ListMoviesInput>,
) -> AppResult<ApiResponse<Vec<MovieResponse>>> {
    let movies = state.movie_service.list(input).await?;
    Ok(ApiResponse::ok(movies))
}

async fn show_movie(
    State(state): State<AppState>,
    Json(req): Json<ShowMovieRequest>,
) -> AppResult<ApiResponse<MovieDetailResponse>> {
    let movie = match (req.movie_id, req.path, req.slug) {
        (Some(id), _, _) => state.movie_service.detail(&id).await?,
        (None, Some(path), _) => state.movie_service.detail_by_path(&path).await?,
        (None, None, Some(slug)) => state.movie_service.detail_by_slug(&slug).await?,
        (None, None, None) => {
            return Err(AppError::BadRequest(
                "One of movieId, path or slug is required".to_string(),
            ));
        }
    };
    Ok(ApiResponse::ok(movie))
}

async fn update_movie(
    State(state): State<AppState>,
    Json(input): Json<UpdateMovieInput>,
) -> AppResult<ApiResponse<MovieDetailResponse>> {
    let movie = state.movie_service.update(input).await?;
    Ok(ApiResponse::ok(movie))
}

async fn delete_movie(
    State(state): State<AppState>,
    Json(req): Json<MovieIdRequest>,
) -> AppResult<StatusCode> {
    state.movie_service.delete(&req.movie_id).await?;
    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_movie))
        .route("/list", post(list_movies))
        .route("/show", post(show_movie))
        .route("/update", post(update_movie))
        .route("/delete", post(delete_movie))
}
