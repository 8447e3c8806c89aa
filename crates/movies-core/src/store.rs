//! # In-Memory Record Store
//!
//! An ordered sequence of [`Movie`] records, seeded from a JSON file at
//! startup and lost on exit. Lookups are linear scans; there are no
//! secondary indices.
//!
//! The sequence lives behind a `parking_lot::RwLock` so the store can be
//! cloned into concurrently running handlers. Every operation takes the lock
//! exactly once and never holds it across an `.await`.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::SeedError;
use crate::movie::{Movie, MovieId, MovieInput, MoviePatch};

/// Thread-safe, cloneable handle to the movie collection.
#[derive(Debug, Clone, Default)]
pub struct MovieStore {
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl MovieStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `movies` in the given order.
    ///
    /// Records without a `rate` get the default one. Fails if two records
    /// share an id.
    pub fn from_movies(mut movies: Vec<Movie>) -> Result<Self, SeedError> {
        for (i, movie) in movies.iter().enumerate() {
            if movies[..i].iter().any(|m| m.id == movie.id) {
                return Err(SeedError::DuplicateId(movie.id.clone()));
            }
        }
        movies.iter_mut().for_each(Movie::fill_default_rate);
        Ok(Self {
            movies: Arc::new(RwLock::new(movies)),
        })
    }

    /// Load the seed file: a JSON array of movie objects.
    ///
    /// Each element must be an object with a string `id`. Every other field
    /// is kept exactly as written, without schema checks.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let movies: Vec<Movie> =
            serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), count = movies.len(), "seed file parsed");
        Self::from_movies(movies)
    }

    /// All records, or only those carrying `genre` (case-insensitive).
    ///
    /// An empty filter string is treated as no filter.
    pub fn list(&self, genre: Option<&str>) -> Vec<Movie> {
        let movies = self.movies.read();
        match genre.filter(|g| !g.is_empty()) {
            Some(g) => movies.iter().filter(|m| m.has_genre(g)).cloned().collect(),
            None => movies.clone(),
        }
    }

    /// Find a record by exact id.
    pub fn get(&self, id: &str) -> Option<Movie> {
        self.movies
            .read()
            .iter()
            .find(|m| m.id.as_str() == id)
            .cloned()
    }

    /// Store a new record under a freshly generated id and return it.
    pub fn create(&self, input: MovieInput) -> Movie {
        let mut movies = self.movies.write();
        let mut id = MovieId::generate();
        // A v4 collision is practically impossible, but seed ids are arbitrary.
        while movies.iter().any(|m| m.id == id) {
            id = MovieId::generate();
        }
        let movie = input.into_movie(id);
        movies.push(movie.clone());
        movie
    }

    /// Merge `patch` into the record with `id`, returning the merged record.
    ///
    /// Returns `None` if no record has that id.
    pub fn update(&self, id: &str, patch: MoviePatch) -> Option<Movie> {
        let mut movies = self.movies.write();
        let movie = movies.iter_mut().find(|m| m.id.as_str() == id)?;
        patch.apply_to(movie);
        Some(movie.clone())
    }

    /// Remove the record with `id`, returning it.
    ///
    /// Returns `None` if no record has that id.
    pub fn delete(&self, id: &str) -> Option<Movie> {
        let mut movies = self.movies.write();
        let index = movies.iter().position(|m| m.id.as_str() == id)?;
        Some(movies.remove(index))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.movies.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
