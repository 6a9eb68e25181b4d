//! Review service.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use moviecat_common::{AppError, AppResult, IdGenerator};
use moviecat_db::entities::review;
use moviecat_db::repositories::{MovieRepository, ReviewRepository};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ordering::validate_permutation;

/// Input for posting a review.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewInput {
    pub movie_id: String,
    /// Review being replied to.
    pub parent_id: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
}

/// Input for reordering a movie's top-level reviews.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderReviewsInput {
    pub movie_id: String,
    pub review_ids: Vec<String>,
}

/// Response for a review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub movie_id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub text: String,
    pub sort_order: Option<i32>,
    pub created_at: String,
}

impl From<review::Model> for ReviewResponse {
    fn from(r: review::Model) -> Self {
        Self {
            id: r.id,
            movie_id: r.movie_id,
            parent_id: r.parent_id,
            name: r.name,
            text: r.text,
            sort_order: r.sort_order,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// A review with its nested replies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewThread {
    #[serde(flatten)]
    pub review: ReviewResponse,
    pub replies: Vec<ReviewThread>,
}

/// Nest a movie's reviews under their parents.
///
/// Input order is kept among siblings. A review whose parent is missing
/// from `reviews` is treated as top-level.
#[must_use]
pub fn build_thread(reviews: Vec<review::Model>) -> Vec<ReviewThread> {
    let ids: HashSet<String> = reviews.iter().map(|r| r.id.clone()).collect();
    let mut roots = Vec::new();
    let mut children: HashMap<String, Vec<review::Model>> = HashMap::new();

    for review in reviews {
        match review.parent_id.clone() {
            Some(parent_id) if ids.contains(&parent_id) && parent_id != review.id => {
                children.entry(parent_id).or_default().push(review);
            }
            _ => roots.push(review),
        }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut children))
        .collect()
}

fn attach(review: review::Model, children: &mut HashMap<String, Vec<review::Model>>) -> ReviewThread {
    let replies = children
        .remove(&review.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach(child, children))
        .collect();

    ReviewThread {
        review: review.into(),
        replies,
    }
}

/// Service for movie reviews.
#[derive(Clone)]
pub struct ReviewService {
    review_repo: ReviewRepository,
    movie_repo: MovieRepository,
    id_gen: IdGenerator,
}

impl ReviewService {
    /// Create a new review service.
    #[must_use]
    pub const fn new(review_repo: ReviewRepository, movie_repo: MovieRepository) -> Self {
        Self {
            review_repo,
            movie_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Post a review or a reply.
    ///
    /// A reply's parent must belong to the same movie.
    pub async fn create(&self, input: CreateReviewInput) -> AppResult<ReviewResponse> {
        input.validate()?;

        self.movie_repo.get_by_id(&input.movie_id).await?;

        if let Some(parent_id) = &input.parent_id {
            let parent = self
                .review_repo
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| AppError::Validation(format!("Unknown parent review: {parent_id}")))?;
            if parent.movie_id != input.movie_id {
                return Err(AppError::Validation(
                    "Parent review belongs to a different movie".to_string(),
                ));
            }
        }

        let sort_order = self
            .review_repo
            .next_sort_order(&input.movie_id, input.parent_id.as_deref())
            .await?;

        let model = review::ActiveModel {
            id: Set(self.id_gen.generate()),
            movie_id: Set(input.movie_id),
            parent_id: Set(input.parent_id),
            email: Set(input.email),
            name: Set(input.name),
            text: Set(input.text),
            sort_order: Set(Some(sort_order)),
            created_at: Set(Utc::now().into()),
        };
        let review = self.review_repo.create(model).await?;

        tracing::info!(
            review_id = %review.id,
            movie_id = %review.movie_id,
            reply = review.parent_id.is_some(),
            "Posted review"
        );

        Ok(review.into())
    }

    /// A movie's reviews that are not replies.
    pub async fn top_level(&self, movie_id: &str) -> AppResult<Vec<ReviewResponse>> {
        self.movie_repo.get_by_id(movie_id).await?;
        let reviews = self.review_repo.find_top_level(movie_id).await?;
        Ok(reviews.into_iter().map(Into::into).collect())
    }

    /// Direct replies to a review.
    pub async fn replies(&self, review_id: &str) -> AppResult<Vec<ReviewResponse>> {
        self.review_repo.get_by_id(review_id).await?;
        let replies = self.review_repo.find_replies(review_id).await?;
        Ok(replies.into_iter().map(Into::into).collect())
    }

    /// Every review of a movie, nested by reply.
    pub async fn thread(&self, movie_id: &str) -> AppResult<Vec<ReviewThread>> {
        self.movie_repo.get_by_id(movie_id).await?;
        let reviews = self.review_repo.find_by_movie(movie_id).await?;
        Ok(build_thread(reviews))
    }

    /// Delete a review. Its replies become top-level.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let review = self.review_repo.get_by_id(id).await?;
        self.review_repo.delete(&review.id).await?;

        tracing::info!(review_id = %review.id, movie_id = %review.movie_id, "Deleted review");

        Ok(())
    }

    /// Set the display order of a movie's top-level reviews.
    pub async fn reorder(&self, input: ReorderReviewsInput) -> AppResult<Vec<ReviewResponse>> {
        self.movie_repo.get_by_id(&input.movie_id).await?;

        let current: Vec<String> = self
            .review_repo
            .find_top_level(&input.movie_id)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();
        validate_permutation(&current, &input.review_ids)?;

        self.review_repo
            .reorder(&input.movie_id, &input.review_ids)
            .await?;

        let reviews = self.review_repo.find_top_level(&input.movie_id).await?;
        Ok(reviews.into_iter().map(Into::into).collect())
    }
}
