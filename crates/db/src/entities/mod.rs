//! Database entities.

#![allow(missing_docs)]

pub mod actor;
pub mod category;
pub mod content_node;
pub mod genre;
pub mod home_page;
pub mod image;
pub mod movie;
pub mod movie_actor;
pub mod movie_director;
pub mod movie_genre;
pub mod movie_shot;
pub mod rating;
pub mod rating_star;
pub mod review;

pub use actor::Entity as Actor;
pub use category::Entity as Category;
pub use content_node::Entity as ContentNode;
pub use genre::Entity as Genre;
pub use home_page::Entity as HomePage;
pub use image::Entity as Image;
pub use movie::Entity as Movie;
pub use movie_actor::Entity as MovieActor;
pub use movie_director::Entity as MovieDirector;
pub use movie_genre::Entity as MovieGenre;
pub use movie_shot::Entity as MovieShot;
pub use rating::Entity as Rating;
pub use rating_star::Entity as RatingStar;
pub use review::Entity as Review;
