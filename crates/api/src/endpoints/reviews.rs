//! Review endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use moviecat_common::AppResult;
use moviecat_core::{CreateReviewInput, ReorderReviewsInput, ReviewResponse, ReviewThread};
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

/// Request naming a review.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewIdRequest {
    pub review_id: String,
}

async fn create_review(
    State(state): State<AppState>,
    Json(input): Json<CreateReviewInput>,
) -> AppResult<ApiResponse<ReviewResponse>> {
    let review = state.review_service.create(input).await?;
    Ok(ApiResponse::ok(review))
}

async fn top_level_reviews(
    State(state): State<AppState>,
    Json(req): Json<MovieIdRequest>,
) -> AppResult<ApiResponse<Vec<ReviewResponse>>> {
    let reviews = state.review_service.top_level(&req.movie_id).await?;
    Ok(ApiResponse::ok(reviews))
}

async fn replies(
    State(state): State<AppState>,
    Json(req): Json<ReviewIdRequest>,
) -> AppResult<ApiResponse<Vec<ReviewResponse>>> {
    let reviews = state.review_service.replies(&req.review_id).await?;
    Ok(ApiResponse::ok(reviews))
}

async fn thread(
    State(state): State<AppState>,
    Json(req): Json<MovieIdRequest>,
) -> AppResult<ApiResponse<Vec<ReviewThread>>> {
    let thread = state.review_service.thread(&req.movie_id).await?;
    Ok(ApiResponse::ok(thread))
}

async fn reorder_reviews(
    State(state): State<AppState>,
    Json(input): Json<ReorderReviewsInput>,
) -> AppResult<ApiResponse<Vec<ReviewResponse>>> {
    let reviews = state.review_service.reorder(input).await?;
    Ok(ApiResponse::ok(reviews))
}

async fn delete_review(
    State(state): State<AppState>,
    Json(req): Json<ReviewIdRequest>,
) -> AppResult<StatusCode> {
    state.review_service.delete(&req.review_id).await?;
    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_review))
        .route("/top-level", post(top_level_reviews))
        .route("/replies", post(replies))
        .route("/thread", post(thread))
        .route("/reorder", post(reorder_reviews))
        .route("/delete", post(delete_review))
}
