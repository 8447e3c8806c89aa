//! # Schema Validation
//!
//! Checks a raw JSON body against the movie schema and produces either a
//! typed [`MovieInput`] / [`MoviePatch`] or the full list of field errors.
//!
//! Validation works on [`serde_json::Value`] rather than a derived
//! `Deserialize` so that wrong types, missing fields and out-of-range values
//! are all reported together with their field path. Unknown keys (including
//! a client-supplied `id`) are ignored.
//!
//! | field      | rule                                          |
//! |------------|-----------------------------------------------|
//! | `title`    | string                                        |
//! | `year`     | integer, 1900..=2024                          |
//! | `director` | string                                        |
//! | `duration` | integer, > 0                                  |
//! | `rate`     | number, 0..=10, defaults to 5 on creation     |
//! | `poster`   | string, absolute URL                          |
//! | `genre`    | non-empty array of [`Genre`] names            |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use utoipa::ToSchema;

use crate::movie::{Genre, MovieInput, MoviePatch, DEFAULT_RATE};

/// Earliest accepted release year.
pub const MIN_YEAR: i64 = 1900;
/// Latest accepted release year.
pub const MAX_YEAR: i64 = 2024;
/// Lowest accepted rating.
pub const MIN_RATE: f64 = 0.0;
/// Highest accepted rating.
pub const MAX_RATE: f64 = 10.0;

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Dotted path of the offending field (`"genre.1"`); empty for the body itself.
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FieldError {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Every constraint violated by a submission, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// The collected errors.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            if e.path.is_empty() {
                f.write_str(&e.message)?;
            } else {
                write!(f, "{}: {}", e.path, e.message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a complete movie submission.
///
/// Every field is required except `rate`, which falls back to
/// [`DEFAULT_RATE`].
pub fn validate_movie(input: &Value) -> Result<MovieInput, ValidationErrors> {
    let mut c = Checker::new(input, Mode::Full)?;
    let fields = (
        c.string("title"),
        c.year(),
        c.string("director"),
        c.duration(),
        c.rate(),
        c.poster(),
        c.genre(),
    );
    // In full mode a required field only comes back empty after an error
    // was recorded for it.
    match fields {
        (
            Some(title),
            Some(year),
            Some(director),
            Some(duration),
            rate,
            Some(poster),
            Some(genre),
        ) if c.errors.is_empty() => Ok(MovieInput {
            title,
            year,
            director,
            duration,
            rate: rate.unwrap_or(DEFAULT_RATE),
            poster,
            genre,
        }),
        _ => Err(ValidationErrors(c.errors)),
    }
}

/// Validate a partial movie submission.
///
/// Every field is optional; fields that are present must satisfy the same
/// rule as in [`validate_movie`]. No default is applied to `rate`.
pub fn validate_partial_movie(input: &Value) -> Result<MoviePatch, ValidationErrors> {
    let mut c = Checker::new(input, Mode::Partial)?;
    let patch = MoviePatch {
        title: c.string("title"),
        year: c.year(),
        director: c.string("director"),
        duration: c.duration(),
        rate: c.rate(),
        poster: c.poster(),
        genre: c.genre(),
    };
    if c.errors.is_empty() {
        Ok(patch)
    } else {
        Err(ValidationErrors(c.errors))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Full,
    Partial,
}

struct Checker<'a> {
    obj: &'a Map<String, Value>,
    mode: Mode,
    errors: Vec<FieldError>,
}

impl<'a> Checker<'a> {
    fn new(input: &'a Value, mode: Mode) -> Result<Self, ValidationErrors> {
        let Some(obj) = input.as_object() else {
            return Err(ValidationErrors(vec![FieldError::new(
                "",
                "movie must be a JSON object",
            )]));
        };
        Ok(Self {
            obj,
            mode,
            errors: Vec::new(),
        })
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(path, message));
    }

    /// Look up a field, recording a "required" error when it is absent in full mode.
    fn field(&mut self, name: &str, required_message: &str) -> Option<&'a Value> {
        let value = self.obj.get(name);
        if value.is_none() && self.mode == Mode::Full {
            self.push(name, required_message);
        }
        value
    }

    fn string(&mut self, name: &str) -> Option<String> {
        let value = self.field(name, &format!("{name} is required"))?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.push(name, format!("{name} must be a string"));
                None
            }
        }
    }

    fn year(&mut self) -> Option<i32> {
        let value = self.field("year", "year is required")?;
        let Some(year) = value.as_number().and_then(integer) else {
            self.push("year", "year must be an integer");
            return None;
        };
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            self.push(
                "year",
                format!("year must be between {MIN_YEAR} and {MAX_YEAR}"),
            );
            return None;
        }
        i32::try_from(year).ok()
    }

    fn duration(&mut self) -> Option<u32> {
        let value = self.field("duration", "duration is required")?;
        let duration = match value.as_number().and_then(integer) {
            Some(d) if d > 0 => d,
            _ => {
                self.push("duration", "duration must be a positive integer");
                return None;
            }
        };
        match u32::try_from(duration) {
            Ok(d) => Some(d),
            Err(_) => {
                self.push("duration", format!("duration must be at most {}", u32::MAX));
                None
            }
        }
    }

    fn rate(&mut self) -> Option<f64> {
        // Absent rate is never an error; creation applies the default.
        let value = self.obj.get("rate")?;
        let Some(rate) = value.as_f64() else {
            self.push("rate", "rate must be a number");
            return None;
        };
        if !(MIN_RATE..=MAX_RATE).contains(&rate) {
            self.push("rate", "rate must be between 0 and 10");
            return None;
        }
        Some(rate)
    }

    fn poster(&mut self) -> Option<String> {
        let poster = self.string("poster")?;
        if url::Url::parse(&poster).is_err() {
            self.push("poster", "Poster must be a valid url");
            return None;
        }
        Some(poster)
    }

    fn genre(&mut self) -> Option<Vec<Genre>> {
        let value = self.field("genre", "Movie genre is required.")?;
        let Some(items) = value.as_array() else {
            self.push("genre", "Movie genre must be an array of enum Genre");
            return None;
        };
        if items.is_empty() {
            self.push("genre", "genre must contain at least one genre");
            return None;
        }

        let mut genres = Vec::with_capacity(items.len());
        let mut valid = true;
        for (i, item) in items.iter().enumerate() {
            match item.as_str().and_then(Genre::from_name) {
                Some(g) => genres.push(g),
                None => {
                    valid = false;
                    self.push(format!("genre.{i}"), invalid_genre_message(item));
                }
            }
        }
        valid.then_some(genres)
    }
}

/// Interpret a JSON number as an integer, accepting floats with no fractional part.
///
/// Out-of-range magnitudes saturate so that they fail the caller's range check.
fn integer(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.as_u64().is_some() {
        return Some(i64::MAX);
    }
    n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)
}

fn invalid_genre_message(item: &Value) -> String {
    let expected = Genre::ALL
        .iter()
        .map(|g| format!("'{g}'"))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("Invalid genre value. Expected {expected}, received {item}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "title": "The Godfather",
            "year": 1972,
            "director": "Francis Ford Coppola",
            "duration": 175,
            "rate": 9.2,
            "poster": "https://example.com/posters/godfather.jpg",
            "genre": ["Crime", "Drama"]
        })
    }

    fn has_path(errors: &ValidationErrors, path: &str) -> bool {
        errors
            .errors()
            .iter()
            .any(|e| e.path == path || e.path.starts_with(&format!("{path}.")))
    }

    fn messages_for(errors: &ValidationErrors, path: &str) -> Vec<String> {
        errors
            .errors()
            .iter()
            .filter(|e| e.path == path)
            .map(|e| e.message.clone())
            .collect()
    }

    #[test]
    fn accepts_valid_movie() {
        let input = validate_movie(&valid_body()).unwrap();
        assert_eq!(input.title, "The Godfather");
        assert_eq!(input.year, 1972);
        assert_eq!(input.duration, 175);
        assert_eq!(input.rate, 9.2);
        assert_eq!(input.genre, vec![Genre::Crime, Genre::Drama]);
    }

    #[test]
    fn rate_defaults_to_five() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("rate");
        let input = validate_movie(&body).unwrap();
        assert_eq!(input.rate, DEFAULT_RATE);
    }

    #[test]
    fn rejects_year_before_1900() {
        let mut body = valid_body();
        body["year"] = json!(1800);
        let err = validate_movie(&body).unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(
            messages_for(&err, "year"),
            vec!["year must be between 1900 and 2024"]
        );
    }

    #[test]
    fn year_bounds_are_inclusive() {
        for year in [1900, 2024] {
            let mut body = valid_body();
            body["year"] = json!(year);
            assert!(validate_movie(&body).is_ok(), "year {year} should pass");
        }
        let mut body = valid_body();
        body["year"] = json!(2025);
        assert!(validate_movie(&body).is_err());
    }

    #[test]
    fn integral_float_year_is_accepted() {
        let mut body = valid_body();
        body["year"] = json!(1999.0);
        assert_eq!(validate_movie(&body).unwrap().year, 1999);
    }

    #[test]
    fn fractional_year_is_rejected() {
        let mut body = valid_body();
        body["year"] = json!(1999.5);
        let err = validate_movie(&body).unwrap_err();
        assert_eq!(messages_for(&err, "year"), vec!["year must be an integer"]);
    }

    #[test]
    fn duration_must_be_positive() {
        for bad in [json!(0), json!(-5), json!(90.5), json!("90")] {
            let mut body = valid_body();
            body["duration"] = bad.clone();
            let err = validate_movie(&body).unwrap_err();
            assert_eq!(
                messages_for(&err, "duration"),
                vec!["duration must be a positive integer"],
                "input {bad}"
            );
        }
    }

    #[test]
    fn oversized_duration_is_rejected() {
        let mut body = valid_body();
        body["duration"] = json!(u64::from(u32::MAX) + 1);
        let err = validate_movie(&body).unwrap_err();
        assert_eq!(
            messages_for(&err, "duration"),
            vec![format!("duration must be at most {}", u32::MAX)]
        );

        body["duration"] = json!(u32::MAX);
        assert_eq!(validate_movie(&body).unwrap().duration, u32::MAX);
    }

    #[test]
    fn rate_must_be_a_number() {
        for bad in [json!("9"), json!(true), Value::Null, json!([9])] {
            let mut body = valid_body();
            body["rate"] = bad.clone();
            let err = validate_movie(&body).unwrap_err();
            assert_eq!(messages_for(&err, "rate"), vec!["rate must be a number"], "input {bad}");
            assert_eq!(err.errors().len(), 1);
        }
        let err = validate_partial_movie(&json!({ "rate": "high" })).unwrap_err();
        assert_eq!(messages_for(&err, "rate"), vec!["rate must be a number"]);
    }

    #[test]
    fn rate_range_is_inclusive() {
        for ok in [json!(0), json!(10), json!(7.5)] {
            let mut body = valid_body();
            body["rate"] = ok;
            assert!(validate_movie(&body).is_ok());
        }
        for bad in [json!(-0.1), json!(10.01)] {
            let mut body = valid_body();
            body["rate"] = bad;
            let err = validate_movie(&body).unwrap_err();
            assert_eq!(messages_for(&err, "rate"), vec!["rate must be between 0 and 10"]);
        }
    }

    #[test]
    fn poster_must_be_url() {
        let mut body = valid_body();
        body["poster"] = json!("not a url");
        let err = validate_movie(&body).unwrap_err();
        assert_eq!(messages_for(&err, "poster"), vec!["Poster must be a valid url"]);
    }

    #[test]
    fn unknown_genre_reports_index() {
        let mut body = valid_body();
        body["genre"] = json!(["Drama", "Romance"]);
        let err = validate_movie(&body).unwrap_err();
        assert!(has_path(&err, "genre"));
        let msgs = messages_for(&err, "genre.1");
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("'Sci-Fi'"));
        assert!(msgs[0].contains("\"Romance\""));
    }

    #[test]
    fn genre_is_case_sensitive_on_input() {
        let mut body = valid_body();
        body["genre"] = json!(["drama"]);
        assert!(validate_movie(&body).is_err());
    }

    #[test]
    fn genre_must_be_non_empty_array() {
        let mut body = valid_body();
        body["genre"] = json!([]);
        let err = validate_movie(&body).unwrap_err();
        assert_eq!(
            messages_for(&err, "genre"),
            vec!["genre must contain at least one genre"]
        );

        body["genre"] = json!("Drama");
        let err = validate_movie(&body).unwrap_err();
        assert_eq!(
            messages_for(&err, "genre"),
            vec!["Movie genre must be an array of enum Genre"]
        );
    }

    #[test]
    fn missing_fields_are_all_reported_in_order() {
        let err = validate_movie(&json!({})).unwrap_err();
        let paths: Vec<&str> = err.errors().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["title", "year", "director", "duration", "poster", "genre"]
        );
        assert_eq!(messages_for(&err, "title"), vec!["title is required"]);
        assert_eq!(messages_for(&err, "genre"), vec!["Movie genre is required."]);
    }

    #[test]
    fn null_is_a_wrong_type_not_absence() {
        let mut body = valid_body();
        body["title"] = Value::Null;
        let err = validate_movie(&body).unwrap_err();
        assert_eq!(messages_for(&err, "title"), vec!["title must be a string"]);

        let err = validate_partial_movie(&json!({ "title": null })).unwrap_err();
        assert_eq!(messages_for(&err, "title"), vec!["title must be a string"]);
    }

    #[test]
    fn multiple_violations_are_collected() {
        let body = json!({
            "title": 42,
            "year": 1800,
            "director": "Someone",
            "duration": -1,
            "poster": "nope",
            "genre": ["Drama"]
        });
        let err = validate_movie(&body).unwrap_err();
        assert_eq!(err.errors().len(), 4);
        assert!(has_path(&err, "title"));
        assert!(has_path(&err, "year"));
        assert!(has_path(&err, "duration"));
        assert!(has_path(&err, "poster"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        for body in [json!([]), json!("movie"), json!(null)] {
            let err = validate_movie(&body).unwrap_err();
            assert_eq!(err.errors()[0].path, "");
            assert!(validate_partial_movie(&body).is_err());
        }
    }

    #[test]
    fn client_supplied_id_is_ignored() {
        let mut body = valid_body();
        body["id"] = json!("chosen-by-client");
        body["extra"] = json!(true);
        assert!(validate_movie(&body).is_ok());
    }

    #[test]
    fn partial_accepts_empty_object() {
        let patch = validate_partial_movie(&json!({})).unwrap();
        assert_eq!(patch, MoviePatch::default());
    }

    #[test]
    fn partial_checks_present_fields_only() {
        let patch = validate_partial_movie(&json!({ "year": 2001, "rate": 8 })).unwrap();
        assert_eq!(patch.year, Some(2001));
        assert_eq!(patch.rate, Some(8.0));
        assert_eq!(patch.title, None);

        let err = validate_partial_movie(&json!({ "year": 1800 })).unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert!(has_path(&err, "year"));
    }

    #[test]
    fn partial_never_defaults_rate() {
        let patch = validate_partial_movie(&json!({ "title": "Heat" })).unwrap();
        assert_eq!(patch.rate, None);
    }

    #[test]
    fn display_joins_errors() {
        let err = validate_movie(&json!({ "title": "x", "year": 1800 })).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("year: year must be between 1900 and 2024; "));
    }

    #[test]
    fn errors_serialize_as_array() {
        let err = validate_partial_movie(&json!({ "rate": 11 })).unwrap_err();
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!([{ "path": "rate", "message": "rate must be between 0 and 10" }])
        );
    }
}
