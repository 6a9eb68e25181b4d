//! Common utilities and shared types for moviecat.
//!
//! This crate provides foundational components used across all moviecat crates:
//!
//! - **Configuration**: Application and site settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Slugs**: URL-safe content node slugs via [`slugify`]
//!
//! # Example
//!
//! ```no_run
//! use moviecat_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     config.validate()?;
//!     let id = IdGenerator::new().generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod slug;

pub use config::{Config, EmailBackend, SiteConfig};
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use slug::{is_valid_slug, slugify};
