//! # Middleware Stack
//!
//! Tower middleware layers for the movies API.

pub mod origin;
pub mod tracing_layer;
