//! HTTP API layer for moviecat.
//!
//! - **Endpoints**: `POST /<group>/<action>` routes with JSON bodies
//! - **Extractors**: client address for rating votes
//! - **Middleware**: application state and the `Host` allow-list
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
