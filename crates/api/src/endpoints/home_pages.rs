//! Home page endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use moviecat_common::{AppError, AppResult};
use moviecat_core::{CreateHomePageInput, HomePageResponse, UpdateHomePageInput};
use serde::Deserialize;

use crate::{
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Request naming a home page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageIdRequest {
    pub page_id: String,
}

/// Request to show a home page by ID or URL path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowPageRequest {
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

/// Request to list home pages.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPagesRequest {
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

async fn create_page(
    State(state): State<AppState>,
    Json(input): Json<CreateHomePageInput>,
) -> AppResult<ApiResponse<HomePageResponse>> {
    let page = state.home_page_service.create(input).await?;
    Ok(ApiResponse::ok(page))
}

async fn list_pages(
    State(state): State<AppState>,
    Json(req): Json<ListPagesRequest>,
) -> AppResult<ApiResponse<Vec<HomePageResponse>>> {
    let pages = state.home_page_service.list(req.limit, req.offset).await?;
    Ok(ApiResponse::ok(pages))
}

async fn show_page(
    State(state): State<AppState>,
    Json(req): Json<ShowPageRequest>,
) -> AppResult<ApiResponse<HomePageResponse>> {
    let page = match (req.page_id, req.path) {
        (Some(id), _) => state.home_page_service.get(&id).await?,
        (None, Some(path)) => state.home_page_service.get_by_path(&path).await?,
        (None, None) => {
            return Err(AppError::BadRequest(
                "One of pageId or path is required".to_string(),
            ));
        }
    };
    Ok(ApiResponse::ok(page))
}

async fn update_page(
    State(state): State<AppState>,
    Json(input): Json<UpdateHomePageInput>,
) -> AppResult<ApiResponse<HomePageResponse>> {
    let page = state.home_page_service.update(input).await?;
    Ok(ApiResponse::ok(page))
}

async fn delete_page(
    State(state): State<AppState>,
    Json(req): Json<PageIdRequest>,
) -> AppResult<StatusCode> {
    state.home_page_service.delete(&req.page_id).await?;
    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_page))
        .route("/list", post(list_pages))
        .route("/show", post(show_page))
        .route("/update", post(update_page))
        .route("/delete", post(delete_page))
}
