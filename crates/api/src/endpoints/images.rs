//! Image endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use moviecat_common::AppResult;
use moviecat_core::{ImageResponse, RegisterImageInput};
use serde::Deserialize;

use crate::{
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Request naming an image.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageIdRequest {
    pub image_id: String,
}

/// Request to list images.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListImagesRequest {
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

async fn register_image(
    State(state): State<AppState>,
    Json(input): Json<RegisterImageInput>,
) -> AppResult<ApiResponse<ImageResponse>> {
    let image = state.image_service.register(input).await?;
    Ok(ApiResponse::ok(image))
}

async fn list_images(
    State(state): State<AppState>,
    Json(req): Json<ListImagesRequest>,
) -> AppResult<ApiResponse<Vec<ImageResponse>>> {
    let images = state.image_service.list(req.limit, req.offset).await?;
    Ok(ApiResponse::ok(images))
}

async fn show_image(
    State(state): State<AppState>,
    Json(req): Json<ImageIdRequest>,
) -> AppResult<ApiResponse<ImageResponse>> {
    let image = state.image_service.get(&req.image_id).await?;
    Ok(ApiResponse::ok(image))
}

async fn delete_image(
    State(state): State<AppState>,
    Json(req): Json<ImageIdRequest>,
) -> AppResult<StatusCode> {
    state.image_service.delete(&req.image_id).await?;
    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_image))
        .route("/list", post(list_images))
        .route("/show", post(show_image))
        .route("/delete", post(delete_image))
}
