//! Business logic services.

#![allow(missing_docs)]

pub mod actor;
pub mod category;
pub mod content_node;
pub mod gallery;
pub mod genre;
pub mod home_page;
pub mod image;
pub mod input;
pub mod movie;
pub mod ordering;
pub mod rating;
pub mod review;

pub use actor::{
    ActorResponse, ActorService, CreateActorInput, FilmographyResponse, UpdateActorInput,
};
pub use category::{CategoryResponse, CategoryService, CreateCategoryInput, UpdateCategoryInput};
pub use content_node::{
    ContentNodeService, CreateNodeInput, NewNode, NodeResponse, RenameNodeInput,
};
pub use gallery::{AddShotInput, GalleryService, ReorderShotsInput, ShotResponse, UpdateShotInput};
pub use genre::{CreateGenreInput, GenreResponse, GenreService, UpdateGenreInput};
pub use home_page::{
    CreateHomePageInput, HomePageResponse, HomePageService, UpdateHomePageInput,
};
pub use image::{ImageResponse, ImageService, RegisterImageInput};
pub use movie::{
    CreateMovieInput, ListMoviesInput, MovieDetailResponse, MovieRepositories, MovieResponse,
    MovieService, UpdateMovieInput,
};
pub use rating::{
    CreateStarInput, RateMovieInput, RatingResponse, RatingService, RatingSummary, StarResponse,
    StarTally,
};
pub use review::{
    CreateReviewInput, ReorderReviewsInput, ReviewResponse, ReviewService, ReviewThread,
};
