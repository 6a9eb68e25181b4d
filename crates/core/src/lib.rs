//! Core business logic for moviecat.
//!
//! Services sit between the HTTP layer and the repositories: they validate
//! input, enforce catalog rules (review threading, gallery order, node
//! paths) and shape responses.

pub mod services;

pub use services::*;
