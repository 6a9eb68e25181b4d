//! Genre endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use moviecat_common::AppResult;
use moviecat_core::{CreateGenreInput, GenreResponse, UpdateGenreInput};
use serde::Deserialize;

use crate::{
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Request naming a genre.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreIdRequest {
    pub genre_id: String,
}

async fn create_genre(
    State(state): State<AppState>,
    Json(input): Json<CreateGenreInput>,
) -> AppResult<ApiResponse<GenreResponse>> {
    let genre = state.genre_service.create(input).await?;
    Ok(ApiResponse::ok(genre))
}

async fn list_genres(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<GenreResponse>>> {
    let genres = state.genre_service.list().await?;
    Ok(ApiResponse::ok(genres))
}

async fn show_genre(
    State(state): State<AppState>,
    Json(req): Json<GenreIdRequest>,
) -> AppResult<ApiResponse<GenreResponse>> {
    let genre = state.genre_service.get(&req.genre_id).await?;
    Ok(ApiResponse::ok(genre))
}

async fn update_genre(
    State(state): State<AppState>,
    Json(input): Json<UpdateGenreInput>,
) -> AppResult<ApiResponse<GenreResponse>> {
    let genre = state.genre_service.update(input).await?;
    Ok(ApiResponse::ok(genre))
}

async fn delete_genre(
    State(state): State<AppState>,
    Json(req): Json<GenreIdRequest>,
) -> AppResult<StatusCode> {
    state.genre_service.delete(&req.genre_id).await?;
    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_genre))
        .route("/list", post(list_genres))
        .route("/show", post(show_genre))
        .route("/update", post(update_genre))
        .route("/delete", post(delete_genre))
}
