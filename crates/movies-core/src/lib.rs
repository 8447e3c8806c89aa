//! # movies-core — Domain Types for the Movies Service
//!
//! Everything the HTTP layer needs that is not HTTP: the movie record, the
//! genre enumeration, the schema validator and the in-memory record store.
//! No HTTP dependencies: the API crate maps these types onto routes and
//! status codes.
//!
//! ## Design Principles
//!
//! 1. **Validated input is a distinct type.** Handlers can only create a
//!    [`Movie`] from a [`MovieInput`] and only patch one with a [`MoviePatch`];
//!    both are produced exclusively by the validator.
//!
//! 2. **Errors are collected, not short-circuited.** [`ValidationErrors`]
//!    carries one [`FieldError`] per violated constraint.
//!
//! 3. **The store is an explicit object.** [`MovieStore`] is owned by the
//!    application state and cloned into handlers; nothing is global.

pub mod error;
pub mod movie;
pub mod store;
pub mod validation;

// Re-export primary types at crate root for ergonomic imports.
pub use error::SeedError;
pub use movie::{Genre, Movie, MovieId, MovieInput, MoviePatch, DEFAULT_RATE};
pub use store::MovieStore;
pub use validation::{validate_movie, validate_partial_movie, FieldError, ValidationErrors};
