//! Category endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use moviecat_common::AppResult;
use moviecat_core::{CreateCategoryInput, CategoryResponse, UpdateCategoryInput};
use serde::Deserialize;

use crate::{
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Request naming a category.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryIdRequest {
    pub category_id: String,
}

async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryInput>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    let category = state.category_service.create(input).await?;
    Ok(ApiResponse::ok(category))
}

async fn list_categories(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<CategoryResponse>>> {
    let categories = state.category_service.list().await?;
    Ok(ApiResponse::ok(categories))
}

async fn show_category(
    State(state): State<AppState>,
    Json(req): Json<CategoryIdRequest>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    let category = state.category_service.get(&req.category_id).await?;
    Ok(ApiResponse::ok(category))
}

async fn update_category(
    State(state): State<AppState>,
    Json(input): Json<UpdateCategoryInput>,
) -> AppResult<ApiResponse<CategoryResponse>> {
    let category = state.category_service.update(input).await?;
    Ok(ApiResponse::ok(category))
}

async fn delete_category(
    State(state): State<AppState>,
    Json(req): Json<CategoryIdRequest>,
) -> AppResult<StatusCode> {
    state.category_service.delete(&req.category_id).await?;
    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_category))
        .route("/list", post(list_categories))
        .route("/show", post(show_category))
        .route("/update", post(update_category))
        .route("/delete", post(delete_category))
}
