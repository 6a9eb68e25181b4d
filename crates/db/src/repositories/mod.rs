//! Database repositories.

mod actor;
mod category;
mod content_node;
mod gallery;
mod genre;
mod home_page;
mod image;
mod movie;
mod rating;
mod review;

pub use actor::{ActorRepository, ActorWithNode};
pub use category::CategoryRepository;
pub use content_node::{ContentNodeRepository, NodeMove};
pub use gallery::GalleryRepository;
pub use genre::GenreRepository;
pub use home_page::{HomePageRepository, HomePageWithNode};
pub use image::ImageRepository;
pub use movie::{MovieFilter, MovieRelations, MovieRepository, MovieWithNode};
pub use rating::{RatingRepository, StarVotes};
pub use review::ReviewRepository;
