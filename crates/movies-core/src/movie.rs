//! # Movie Records
//!
//! The stored [`Movie`] record, its [`MovieId`], the closed [`Genre`]
//! enumeration, and the two validated input shapes: [`MovieInput`] for
//! creation and [`MoviePatch`] for partial updates.
//!
//! A stored record is a JSON object with a string `id`. Seed data is loaded
//! without schema enforcement, so every other field is kept exactly as the
//! seed file wrote it, including fields the schema does not know about and
//! genres outside the enumeration. Records created or patched through the
//! API only ever receive validated values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

/// Rating assigned when a new movie is submitted without one.
pub const DEFAULT_RATE: f64 = 5.0;

/// Identifier of a movie record.
///
/// Server-generated ids are UUID v4 strings. Lookups compare the raw string,
/// so ids from the seed file are matched exactly as written there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MovieId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MovieId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Movie genre accepted by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Genre {
    Action,
    Adventure,
    Crime,
    Comedy,
    Drama,
    Fantasy,
    Horror,
    Thriller,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Genre {
    /// All genres, in declaration order.
    pub const ALL: [Genre; 9] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Crime,
        Genre::Comedy,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Thriller,
        Genre::SciFi,
    ];

    /// Wire name of the genre.
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Crime => "Crime",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Thriller => "Thriller",
            Genre::SciFi => "Sci-Fi",
        }
    }

    /// Parse a wire name. Matching is exact: `"drama"` is not a genre.
    pub fn from_name(name: &str) -> Option<Genre> {
        Self::ALL.into_iter().find(|g| g.as_str() == name)
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A movie record as held by the store and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Movie {
    #[schema(value_type = String, format = Uuid)]
    pub id: MovieId,
    /// Every other field of the record, as stored.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Movie {
    /// An id with no other fields.
    pub fn new(id: MovieId) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    /// Raw value of a field other than `id`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The title, when the record holds one as a string.
    pub fn title(&self) -> Option<&str> {
        self.field("title").and_then(Value::as_str)
    }

    /// Whether any of the record's genres equals `name`, ignoring case.
    ///
    /// Non-string members and a non-array `genre` never match.
    pub fn has_genre(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.field("genre")
            .and_then(Value::as_array)
            .is_some_and(|genres| {
                genres
                    .iter()
                    .filter_map(Value::as_str)
                    .any(|g| g.to_lowercase() == wanted)
            })
    }

    /// Give the record the default rate if it has none.
    pub fn fill_default_rate(&mut self) {
        self.fields
            .entry("rate")
            .or_insert_with(|| Value::from(DEFAULT_RATE));
    }

    fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.fields.insert(name.to_string(), value.into());
    }
}

/// A complete, validated movie submission.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MovieInput {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub rate: f64,
    pub poster: String,
    pub genre: Vec<Genre>,
}

impl MovieInput {
    /// Turn the submission into a stored record under the given id.
    pub fn into_movie(self, id: MovieId) -> Movie {
        let mut movie = Movie::new(id);
        MoviePatch::from(self).apply_to(&mut movie);
        movie
    }
}

/// A validated partial update. Absent fields leave the record untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub duration: Option<u32>,
    pub rate: Option<f64>,
    pub poster: Option<String>,
    pub genre: Option<Vec<Genre>>,
}

impl From<MovieInput> for MoviePatch {
    fn from(input: MovieInput) -> Self {
        Self {
            title: Some(input.title),
            year: Some(input.year),
            director: Some(input.director),
            duration: Some(input.duration),
            rate: Some(input.rate),
            poster: Some(input.poster),
            genre: Some(input.genre),
        }
    }
}

impl MoviePatch {
    /// Overwrite the fields present in the patch. The id is never touched.
    pub fn apply_to(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.set("title", title);
        }
        if let Some(year) = self.year {
            movie.set("year", year);
        }
        if let Some(director) = self.director {
            movie.set("director", director);
        }
        if let Some(duration) = self.duration {
            movie.set("duration", duration);
        }
        if let Some(rate) = self.rate {
            movie.set("rate", rate);
        }
        if let Some(poster) = self.poster {
            movie.set("poster", poster);
        }
        if let Some(genre) = self.genre {
            let names: Vec<Value> = genre.iter().map(|g| Value::from(g.as_str())).collect();
            movie.set("genre", names);
        }
    }
}
