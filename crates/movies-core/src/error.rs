//! # Error Hierarchy
//!
//! Errors raised while seeding the record store. Validation failures have
//! their own type in [`crate::validation`] because they are an expected
//! outcome of handling client input, not a fault.

use std::path::PathBuf;

use thiserror::Error;

use crate::movie::MovieId;

/// Failure to load the seed file at startup.
#[derive(Error, Debug)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not a JSON array of movie objects.
    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        /// Path that was being parsed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Two seed records share the same id.
    #[error("duplicate movie id in seed data: {0}")]
    DuplicateId(MovieId),
}
