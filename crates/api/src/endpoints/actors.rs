//! Actor endpoints.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use moviecat_common::{AppError, AppResult};
use moviecat_core::{ActorResponse, CreateActorInput, FilmographyResponse, UpdateActorInput};
use serde::Deserialize;

use crate::{
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Request naming an actor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorIdRequest {
    pub actor_id: String,
}

/// Request to show an actor by ID, URL path or page slug.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowActorRequest {
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    /// Public URL path, e.g. `/actors/keanu-reeves/`.
    #[serde(default)]
    pub path: Option<String>,
}

/// Request to list actors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActorsRequest {
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

async fn create_actor(
    State(state): State<AppState>,
    Json(input): Json<CreateActorInput>,
) -> AppResult<ApiResponse<ActorResponse>> {
    let actor = state.actor_service.create(input).await?;
    Ok(ApiResponse::ok(actor))
}

async fn list_actors(
    State(state): State<AppState>,
    Json(req): Json<ListActorsRequest>,
) -> AppResult<ApiResponse<Vec<ActorResponse>>> {
    let actors = state.actor_service.list(req.limit, req.offset).await?;
    Ok(ApiResponse::ok(actors))
}

async fn show_actor(
    State(state): State<AppState>,
    Json(req): Json<ShowActorRequest>,
) -> AppResult<ApiResponse<ActorResponse>> {
    let actor = match (req.actor_id, req.path, req.slug) {
        (Some(id), _, _) => state.actor_service.get(&id).await?,
        (None, Some(path), _) => state.actor_service.get_by_path(&path).await?,
        (None, None, Some(slug)) => state.actor_service.get_by_slug(&slug).await?,
        (None, None, None) => {
            return Err(AppError::BadRequest(
                "One of actorId, path or slug is required".to_string(),
            ));
        }
    };
    Ok(ApiResponse::ok(actor))
}

async fn update_actor(
    State(state): State<AppState>,
    Json(input): Json<UpdateActorInput>,
) -> AppResult<ApiResponse<ActorResponse>> {
    let actor = state.actor_service.update(input).await?;
    Ok(ApiResponse::ok(actor))
}

async fn delete_actor(
    State(state): State<AppState>,
    Json(req): Json<ActorIdRequest>,
) -> AppResult<StatusCode> {
    state.actor_service.delete(&req.actor_id).await?;
    Ok(no_content())
}

async fn filmography(
    State(state): State<AppState>,
    Json(req): Json<ActorIdRequest>,
) -> AppResult<ApiResponse<FilmographyResponse>> {
    let filmography = state.actor_service.filmography(&req.actor_id).await?;
    Ok(ApiResponse::ok(filmography))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_actor))
        .route("/list", post(list_actors))
        .route("/show", post(show_actor))
        .route("/update", post(update_actor))
        .route("/delete", post(delete_actor))
        .route("/filmography", post(filmography))
}
