//! Content node endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use moviecat_common::AppResult;
use moviecat_core::{CreateNodeInput, NodeResponse, RenameNodeInput};
use serde::Deserialize;

use crate::{
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Request naming a node.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeIdRequest {
    pub node_id: String,
}

/// Request to resolve a URL path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvePathRequest {
    pub path: String,
}

/// Request to list children.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildrenRequest {
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Request to publish or unpublish.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub node_id: String,
    pub live: bool,
}

async fn create_node(
    State(state): State<AppState>,
    Json(input): Json<CreateNodeInput>,
) -> AppResult<ApiResponse<NodeResponse>> {
    let node = state.node_service.create(input).await?;
    Ok(ApiResponse::ok(node))
}

async fn show_node(
    State(state): State<AppState>,
    Json(req): Json<NodeIdRequest>,
) -> AppResult<ApiResponse<NodeResponse>> {
    let node = state.node_service.get(&req.node_id).await?;
    Ok(ApiResponse::ok(node))
}

async fn resolve_path(
    State(state): State<AppState>,
    Json(req): Json<ResolvePathRequest>,
) -> AppResult<ApiResponse<NodeResponse>> {
    let node = state.node_service.find_by_path(&req.path).await?;
    Ok(ApiResponse::ok(node))
}

async fn list_children(
    State(state): State<AppState>,
    Json(req): Json<ChildrenRequest>,
) -> AppResult<ApiResponse<Vec<NodeResponse>>> {
    let nodes = state.node_service.children(req.parent_id.as_deref()).await?;
    Ok(ApiResponse::ok(nodes))
}

async fn rename_node(
    State(state): State<AppState>,
    Json(input): Json<RenameNodeInput>,
) -> AppResult<ApiResponse<NodeResponse>> {
    let node = state.node_service.rename(input).await?;
    Ok(ApiResponse::ok(node))
}

async fn publish_node(
    State(state): State<AppState>,
    Json(req): Json<PublishRequest>,
) -> AppResult<ApiResponse<NodeResponse>> {
    let node = state.node_service.set_live(&req.node_id, req.live).await?;
    Ok(ApiResponse::ok(node))
}

async fn delete_node(
    State(state): State<AppState>,
    Json(req): Json<NodeIdRequest>,
) -> AppResult<StatusCode> {
    state.node_service.delete(&req.node_id).await?;
    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_node))
        .route("/show", post(show_node))
        .route("/resolve", post(resolve_path))
        .route("/children", post(list_children))
        .route("/rename", post(rename_node))
        .route("/publish", post(publish_node))
        .route("/delete", post(delete_node))
}
