//! # API Route Modules
//!
//! - `root`: static greeting at `/`.
//! - `movies`: CRUD over the in-memory movie collection at `/movies`.

pub mod movies;
pub mod root;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain confirmation payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
