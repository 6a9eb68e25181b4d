//! Actor service.
//!
//! Actors and directors share one record type; a person's role comes from
//! the movie they are linked to.

use moviecat_common::{AppError, AppResult, IdGenerator};
use moviecat_db::entities::{actor, content_node};
use moviecat_db::repositories::{ActorRepository, ImageRepository, MovieRepository};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::content_node::{ContentNodeService, NodeResponse, RenameNodeInput, normalize_path};
use super::input::{double_option, page_limit};
use super::movie::MovieResponse;

/// Input for creating an actor.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateActorInput {
    /// Node the actor's page is placed under.
    pub parent_id: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub slug: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub age: i16,
    #[serde(default)]
    pub description: String,
    pub image_id: Option<String>,
}

/// Input for updating an actor.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActorInput {
    pub actor_id: String,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub slug: Option<String>,
    #[validate(range(min = 0))]
    pub age: Option<i16>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_id: Option<Option<String>>,
}

/// Response for an actor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorResponse {
    pub id: String,
    pub node: NodeResponse,
    pub age: i16,
    pub description: String,
    pub image_id: Option<String>,
}

impl ActorResponse {
    /// Combine an actor with its node.
    pub fn from_parts(actor: actor::Model, node: Option<content_node::Model>) -> AppResult<Self> {
        let node = node.ok_or_else(|| {
            AppError::Internal(format!("Actor {} has no content node", actor.id))
        })?;

        Ok(Self {
            id: actor.id,
            node: node.into(),
            age: actor.age,
            description: actor.description,
            image_id: actor.image_id,
        })
    }
}

/// Movies an actor is credited on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmographyResponse {
    pub actor: ActorResponse,
    pub acted_in: Vec<MovieResponse>,
    pub directed: Vec<MovieResponse>,
}

/// Service for actors and directors.
#[derive(Clone)]
pub struct ActorService {
    actor_repo: ActorRepository,
    movie_repo: MovieRepository,
    image_repo: ImageRepository,
    node_service: ContentNodeService,
    id_gen: IdGenerator,
}

impl ActorService {
    /// Create a new actor service.
    #[must_use]
    pub const fn new(
        actor_repo: ActorRepository,
        movie_repo: MovieRepository,
        image_repo: ImageRepository,
        node_service: ContentNodeService,
    ) -> Self {
        Self {
            actor_repo,
            movie_repo,
            image_repo,
            node_service,
            id_gen: IdGenerator::new(),
        }
    }

    async fn ensure_image(&self, image_id: Option<&str>) -> AppResult<()> {
        if let Some(image_id) = image_id {
            if self.image_repo.find_by_id(image_id).await?.is_none() {
                return Err(AppError::Validation(format!("Unknown image: {image_id}")));
            }
        }
        Ok(())
    }

    /// Create an actor with its page node.
    pub async fn create(&self, input: CreateActorInput) -> AppResult<ActorResponse> {
        input.validate()?;
        self.ensure_image(input.image_id.as_deref()).await?;

        let new_node = self
            .node_service
            .prepare(input.parent_id.as_deref(), &input.title, input.slug.as_deref())
            .await?;
        let model = actor::ActiveModel {
            id: Set(self.id_gen.generate()),
            node_id: Set(new_node.id),
            age: Set(input.age),
            description: Set(input.description),
            image_id: Set(input.image_id),
        };
        let (actor, node) = self.actor_repo.create(new_node.model, model).await?;

        tracing::info!(actor_id = %actor.id, url_path = %node.url_path, "Created actor");

        ActorResponse::from_parts(actor, Some(node))
    }

    /// Get an actor.
    pub async fn get(&self, id: &str) -> AppResult<ActorResponse> {
        let (actor, node) = self
            .actor_repo
            .find_with_node(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Actor: {id}")))?;
        ActorResponse::from_parts(actor, node)
    }

    /// Get an actor by page slug. Ambiguous slugs are a `Conflict`.
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<ActorResponse> {
        let mut found = self.actor_repo.find_by_slug(slug, 2).await?;
        if found.len() > 1 {
            return Err(AppError::Conflict(format!(
                "Slug {slug} matches several actors; look it up by path"
            )));
        }
        let (actor, node) = found
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("Actor: {slug}")))?;
        ActorResponse::from_parts(actor, node)
    }

    /// Get an actor by public URL path.
    pub async fn get_by_path(&self, path: &str) -> AppResult<ActorResponse> {
        let url_path = normalize_path(path);
        let (actor, node) = self
            .actor_repo
            .find_by_url_path(&url_path)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Actor: {url_path}")))?;
        ActorResponse::from_parts(actor, node)
    }

    /// List actors by name.
    pub async fn list(&self, limit: Option<u64>, offset: Option<u64>) -> AppResult<Vec<ActorResponse>> {
        self.actor_repo
            .find_with_pagination(page_limit(limit), offset.unwrap_or(0))
            .await?
            .into_iter()
            .map(|(actor, node)| ActorResponse::from_parts(actor, node))
            .collect()
    }

    /// Update an actor. A new title or slug renames the page node.
    pub async fn update(&self, input: UpdateActorInput) -> AppResult<ActorResponse> {
        input.validate()?;

        let actor = self.actor_repo.get_by_id(&input.actor_id).await?;
        if let Some(image_id) = &input.image_id {
            self.ensure_image(image_id.as_deref()).await?;
        }

        let node_move = if input.title.is_some() || input.slug.is_some() {
            Some(
                self.node_service
                    .plan_rename(RenameNodeInput {
                        node_id: actor.node_id.clone(),
                        title: input.title,
                        slug: input.slug,
                    })
                    .await?,
            )
        } else {
            None
        };

        let mut active: actor::ActiveModel = actor.into();
        if let Some(age) = input.age {
            active.age = Set(age);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(image_id) = input.image_id {
            active.image_id = Set(image_id);
        }
        let actor = self.actor_repo.update(active, node_move).await?;

        self.get(&actor.id).await
    }

    /// Delete an actor and its page. Movies they were credited on remain.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let actor = self.actor_repo.get_by_id(id).await?;
        let (acted, directed) = self.actor_repo.count_credits(&actor.id).await?;
        self.actor_repo.delete(&actor).await?;

        tracing::info!(
            actor_id = %actor.id,
            acted,
            directed,
            "Deleted actor"
        );

        Ok(())
    }

    /// Movies an actor played in and directed.
    pub async fn filmography(&self, id: &str) -> AppResult<FilmographyResponse> {
        let actor = self.get(id).await?;

        let (acted_in, directed) = tokio::try_join!(
            self.movie_repo.find_by_actor(id),
            self.movie_repo.find_by_director(id),
        )?;

        Ok(FilmographyResponse {
            actor,
            acted_in: acted_in
                .into_iter()
                .map(|(movie, node)| MovieResponse::from_parts(movie, node))
                .collect::<AppResult<_>>()?,
            directed: directed
                .into_iter()
                .map(|(movie, node)| MovieResponse::from_parts(movie, node))
                .collect::<AppResult<_>>()?,
        })
    }
}
