//! Rating service.
//!
//! Voting is anonymous and append-only: every vote is stored with the
//! submitter's address, and the same address may vote again.

use std::collections::HashMap;
use std::net::IpAddr;

use chrono::Utc;
use moviecat_common::{AppError, AppResult, IdGenerator};
use moviecat_db::entities::{rating, rating_star};
use moviecat_db::repositories::{MovieRepository, RatingRepository, StarVotes};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for creating a star.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStarInput {
    pub value: i16,
    pub sort_order: Option<i32>,
}

/// Input for voting on a movie.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RateMovieInput {
    #[validate(length(min = 1))]
    pub movie_id: String,
    #[validate(length(min = 1))]
    pub star_id: String,
}

/// Response for a star.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarResponse {
    pub id: String,
    pub value: i16,
    pub sort_order: Option<i32>,
}

impl From<rating_star::Model> for StarResponse {
    fn from(s: rating_star::Model) -> Self {
        Self {
            id: s.id,
            value: s.value,
            sort_order: s.sort_order,
        }
    }
}

/// Response for a recorded vote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub id: String,
    pub movie_id: String,
    pub star_id: String,
    pub created_at: String,
}

impl From<rating::Model> for RatingResponse {
    fn from(r: rating::Model) -> Self {
        Self {
            id: r.id,
            movie_id: r.movie_id,
            star_id: r.star_id,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Votes cast with one star value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarTally {
    pub star_id: String,
    pub value: i16,
    pub votes: i64,
}

/// Aggregate rating of a movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub votes: i64,
    /// Mean star value, `None` without votes.
    pub average: Option<f64>,
    /// One entry per star, highest value first.
    pub stars: Vec<StarTally>,
}

/// Combine per-star vote counts into a summary.
///
/// `stars` must already be in listing order. Counts for unknown stars are
/// ignored.
#[must_use]
pub fn summarize(stars: &[rating_star::Model], counts: &[StarVotes]) -> RatingSummary {
    let by_star: HashMap<&str, i64> = counts
        .iter()
        .map(|c| (c.star_id.as_str(), c.votes))
        .collect();

    let tallies: Vec<StarTally> = stars
        .iter()
        .map(|s| StarTally {
            star_id: s.id.clone(),
            value: s.value,
            votes: by_star.get(s.id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    let votes: i64 = tallies.iter().map(|t| t.votes).sum();
    let weighted: i64 = tallies.iter().map(|t| i64::from(t.value) * t.votes).sum();
    let average = (votes > 0).then(|| weighted as f64 / votes as f64);

    RatingSummary {
        votes,
        average,
        stars: tallies,
    }
}

/// Parse a submitter address.
pub fn parse_ip(raw: &str) -> AppResult<IpAddr> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid IP address: {raw}")))
}

/// Service for rating stars and votes.
#[derive(Clone)]
pub struct RatingService {
    rating_repo: RatingRepository,
    movie_repo: MovieRepository,
    id_gen: IdGenerator,
}

impl RatingService {
    /// Create a new rating service.
    #[must_use]
    pub const fn new(rating_repo: RatingRepository, movie_repo: MovieRepository) -> Self {
        Self {
            rating_repo,
            movie_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All stars, highest value first.
    pub async fn list_stars(&self) -> AppResult<Vec<StarResponse>> {
        let stars = self.rating_repo.find_stars().await?;
        Ok(stars.into_iter().map(Into::into).collect())
    }

    /// Add a star value.
    pub async fn create_star(&self, input: CreateStarInput) -> AppResult<StarResponse> {
        input.validate()?;

        let model = rating_star::ActiveModel {
            id: Set(self.id_gen.generate()),
            value: Set(input.value),
            sort_order: Set(input.sort_order),
        };
        let star = self.rating_repo.create_star(model).await?;

        tracing::info!(star_id = %star.id, value = star.value, "Created rating star");

        Ok(star.into())
    }

    /// Remove a star and every vote cast with it.
    pub async fn delete_star(&self, id: &str) -> AppResult<()> {
        let star = self.rating_repo.get_star_by_id(id).await?;
        self.rating_repo.delete_star(&star.id).await?;

        tracing::info!(star_id = %star.id, "Deleted rating star");

        Ok(())
    }

    /// Record a vote from `ip`.
    pub async fn rate(&self, input: RateMovieInput, ip: IpAddr) -> AppResult<RatingResponse> {
        input.validate()?;

        self.movie_repo.get_by_id(&input.movie_id).await?;
        let star = self
            .rating_repo
            .find_star_by_id(&input.star_id)
            .await?
            .ok_or_else(|| AppError::Validation(format!("Unknown star: {}", input.star_id)))?;

        let model = rating::ActiveModel {
            id: Set(self.id_gen.generate()),
            ip: Set(ip.to_string()),
            star_id: Set(star.id),
            movie_id: Set(input.movie_id),
            created_at: Set(Utc::now().into()),
        };
        let rating = self.rating_repo.create_rating(model).await?;

        tracing::debug!(movie_id = %rating.movie_id, star = star.value, "Recorded vote");

        Ok(rating.into())
    }

    /// Vote totals for a movie.
    pub async fn summary(&self, movie_id: &str) -> AppResult<RatingSummary> {
        self.movie_repo.get_by_id(movie_id).await?;
        self.summary_unchecked(movie_id).await
    }

    /// Vote totals for a movie already known to exist.
    pub(crate) async fn summary_unchecked(&self, movie_id: &str) -> AppResult<RatingSummary> {
        let stars = self.rating_repo.find_stars().await?;
        let counts = self.rating_repo.vote_counts(movie_id).await?;
        Ok(summarize(&stars, &counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use moviecat_db::entities::movie;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn star(id: &str, value: i16) -> rating_star::Model {
        rating_star::Model {
            id: id.to_string(),
            value,
            sort_order: None,
        }
    }

    fn votes(star_id: &str, votes: i64) -> StarVotes {
        StarVotes {
            star_id: star_id.to_string(),
            votes,
        }
    }

    fn create_test_movie(id: &str) -> movie::Model {
        movie::Model {
            id: id.to_string(),
            node_id: format!("n-{id}"),
            tagline: String::new(),
            description: String::new(),
            image_id: None,
            year: 1995,
            country: "USA".to_string(),
            world_premiere: NaiveDate::from_ymd_opt(1995, 12, 15).unwrap(),
            budget: 0,
            fees_in_usa: 0,
            fees_in_world: 0,
            category_id: None,
        }
    }

    #[test]
    fn test_summarize_average() {
        let stars = [star("s5", 5), star("s4", 4), star("s1", 1)];
        let summary = summarize(&stars, &[votes("s5", 3), votes("s1", 1)]);

        assert_eq!(summary.votes, 4);
        assert_eq!(summary.average, Some(4.0));
        assert_eq!(summary.stars[1].votes, 0);
        assert!(summary.stars.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn test_summarize_without_votes() {
        let summary = summarize(&[star("s5", 5)], &[]);

        assert_eq!(summary.votes, 0);
        assert_eq!(summary.average, None);
    }

    #[test]
    fn test_parse_ip() {
        assert!(parse_ip("192.168.0.1").unwrap().is_ipv4());
        assert!(parse_ip("2001:db8::1").unwrap().is_ipv6());
        assert!(matches!(parse_ip("not-an-ip"), Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_rate_unknown_star() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_movie("m1")]])
                .append_query_results([Vec::<rating_star::Model>::new()])
                .into_connection(),
        );

        let service = RatingService::new(
            RatingRepository::new(Arc::clone(&db)),
            MovieRepository::new(db),
        );
        let input = RateMovieInput {
            movie_id: "m1".to_string(),
            star_id: "s9".to_string(),
        };
        let result = service.rate(input, "10.0.0.1".parse().unwrap()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_rate_stores_ipv6() {
        let rating = rating::Model {
            id: "r1".to_string(),
            ip: "2001:db8::1".to_string(),
            star_id: "s5".to_string(),
            movie_id: "m1".to_string(),
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_movie("m1")]])
                .append_query_results([[star("s5", 5)]])
                .append_query_results([[rating]])
                .into_connection(),
        );

        let service = RatingService::new(
            RatingRepository::new(Arc::clone(&db)),
            MovieRepository::new(db),
        );
        let input = RateMovieInput {
            movie_id: "m1".to_string(),
            star_id: "s5".to_string(),
        };
        let result = service
            .rate(input, "2001:db8::1".parse().unwrap())
            .await
            .unwrap();

        assert_eq!(result.star_id, "s5");
    }
}
