//! Gallery endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use moviecat_common::AppResult;
use moviecat_core::{AddShotInput, ReorderShotsInput, ShotResponse, UpdateShotInput};
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

/// Request naming a shot.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotIdRequest {
    pub shot_id: String,
}

async fn add_shot(
    State(state): State<AppState>,
    Json(input): Json<AddShotInput>,
) -> AppResult<ApiResponse<ShotResponse>> {
    let shot = state.gallery_service.add(input).await?;
    Ok(ApiResponse::ok(shot))
}

async fn list_shots(
    State(state): State<AppState>,
    Json(req): Json<MovieIdRequest>,
) -> AppResult<ApiResponse<Vec<ShotResponse>>> {
    let shots = state.gallery_service.list(&req.movie_id).await?;
    Ok(ApiResponse::ok(shots))
}

async fn update_shot(
    State(state): State<AppState>,
    Json(input): Json<UpdateShotInput>,
) -> AppResult<ApiResponse<ShotResponse>> {
    let shot = state.gallery_service.update(input).await?;
    Ok(ApiResponse::ok(shot))
}

async fn reorder_shots(
    State(state): State<AppState>,
    Json(input): Json<ReorderShotsInput>,
) -> AppResult<ApiResponse<Vec<ShotResponse>>> {
    let shots = state.gallery_service.reorder(input).await?;
    Ok(ApiResponse::ok(shots))
}

async fn delete_shot(
    State(state): State<AppState>,
    Json(req): Json<ShotIdRequest>,
) -> AppResult<StatusCode> {
    state.gallery_service.delete(&req.shot_id).await?;
    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_shot))
        .route("/list", post(list_shots))
        .route("/update", post(update_shot))
        .route("/reorder", post(reorder_shots))
        .route("/delete", post(delete_shot))
}
