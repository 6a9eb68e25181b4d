//! Rating endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use moviecat_common::AppResult;
use moviecat_core::{CreateStarInput, RateMovieInput, RatingResponse, RatingSummary, StarResponse};
use serde::Deserialize;

use crate::{
    extractors::ClientIp,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Request naming a star.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarIdRequest {
    pub star_id: String,
}

/// Request naming a movie.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieIdRequest {
    pub movie_id: String,
}

async fn list_stars(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<StarResponse>>> {
    let stars = state.rating_service.list_stars().await?;
    Ok(ApiResponse::ok(stars))
}

async fn create_star(
    State(state): State<AppState>,
    Json(input): Json<CreateStarInput>,
) -> AppResult<ApiResponse<StarResponse>> {
    let star = state.rating_service.create_star(input).await?;
    Ok(ApiResponse::ok(star))
}

async fn delete_star(
    State(state): State<AppState>,
    Json(req): Json<StarIdRequest>,
) -> AppResult<StatusCode> {
    state.rating_service.delete_star(&req.star_id).await?;
    Ok(no_content())
}

async fn rate_movie(
    ClientIp(ip): ClientIp,
    State(state): State<AppState>,
    Json(input): Json<RateMovieInput>,
) -> AppResult<ApiResponse<RatingResponse>> {
    let rating = state.rating_service.rate(input, ip).await?;
    Ok(ApiResponse::ok(rating))
}

async fn rating_summary(
    State(state): State<AppState>,
    Json(req): Json<MovieIdRequest>,
) -> AppResult<ApiResponse<RatingSummary>> {
    let summary = state.rating_service.summary(&req.movie_id).await?;
    Ok(ApiResponse::ok(summary))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stars", post(list_stars))
        .route("/stars/create", post(create_star))
        .route("/stars/delete", post(delete_star))
        .route("/rate", post(rate_movie))
        .route("/summary", post(rating_summary))
}
