//! Field validation for review payloads.
//!
//! Rules run in a fixed order (presence, then type, then range) so the first
//! violated rule decides the error a client sees.

use crate::models::{NewReview, Rating, ReviewChanges};
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Fields every create request must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["pizzaName", "rating", "comment", "reviewer"];

/// Fields a client may change after creation.
pub const MUTABLE_FIELDS: [&str; 5] = ["pizzaName", "rating", "comment", "reviewer", "restaurant"];

/// Client-caused payload errors. The display text is the message returned
/// in the `error` field of a 400 response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Missing required fields")]
    MissingFields,
    #[error("Rating must be a number")]
    RatingNotNumber,
    #[error("Rating must be a whole number")]
    RatingNotWhole,
    #[error("{field} must be a string")]
    NotAString { field: &'static str },
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("No fields to update")]
    NoFieldsToUpdate,
    #[error("Field cannot be updated")]
    ImmutableField { field: String },
    #[error("Rating must be a number between 1 and 5")]
    InvalidUpdateRating,
    #[error("{field} must be a non-empty string")]
    EmptyField { field: &'static str },
}

impl ValidationError {
    /// Extra key/value to include next to `error` in the response body.
    pub fn detail(&self) -> Option<(&'static str, Value)> {
        match self {
            ValidationError::MissingFields => Some(("required", json!(REQUIRED_FIELDS))),
            ValidationError::ImmutableField { field } => Some(("field", json!(field))),
            _ => None,
        }
    }
}

/// Validate a create body and build the review it describes.
pub fn parse_new_review(body: &Map<String, Value>) -> Result<NewReview, ValidationError> {
    if REQUIRED_FIELDS
        .iter()
        .any(|field| body.get(*field).is_none_or(is_blank))
    {
        return Err(ValidationError::MissingFields);
    }

    let rating = rating_number(body.get("rating").unwrap_or(&Value::Null))?;
    let pizza_name = required_string(body, "pizzaName")?;
    let comment = required_string(body, "comment")?;
    let reviewer = required_string(body, "reviewer")?;
    let restaurant = match body.get("restaurant") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(ValidationError::NotAString { field: "restaurant" }),
    };

    let rating = rating_in_range(rating)?;

    Ok(NewReview {
        pizza_name,
        rating,
        comment,
        reviewer,
        restaurant,
    })
}

/// Validate an update body and build the partial change set.
pub fn parse_review_changes(body: &Map<String, Value>) -> Result<ReviewChanges, ValidationError> {
    if body.is_empty() {
        return Err(ValidationError::NoFieldsToUpdate);
    }

    if let Some(field) = body.keys().find(|k| !MUTABLE_FIELDS.contains(&k.as_str())) {
        return Err(ValidationError::ImmutableField {
            field: field.clone(),
        });
    }

    let rating = match body.get("rating") {
        None => None,
        Some(value) => {
            let rating = rating_number(value)
                .and_then(rating_in_range)
                .map_err(|_| ValidationError::InvalidUpdateRating)?;
            Some(rating)
        }
    };

    Ok(ReviewChanges {
        pizza_name: optional_non_empty(body, "pizzaName")?,
        rating,
        comment: optional_non_empty(body, "comment")?,
        reviewer: optional_non_empty(body, "reviewer")?,
        restaurant: optional_non_empty(body, "restaurant")?,
    })
}

/// `null`, `""`, `0` and `false` count as not supplied.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn rating_number(value: &Value) -> Result<f64, ValidationError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(ValidationError::RatingNotNumber),
        _ => Err(ValidationError::RatingNotNumber),
    }
}

/// Range is checked before wholeness, so `6.5` is out of range while `4.5`
/// is not a whole number. Integral floats such as `4.0` are accepted.
fn rating_in_range(value: f64) -> Result<Rating, ValidationError> {
    if !(f64::from(Rating::MIN)..=f64::from(Rating::MAX)).contains(&value) {
        return Err(ValidationError::RatingOutOfRange);
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::RatingNotWhole);
    }
    Rating::new(value as i64).ok_or(ValidationError::RatingOutOfRange)
}

fn required_string(body: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    match body.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(ValidationError::NotAString { field }),
    }
}

fn optional_non_empty(
    body: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match body.get(field) {
        None => Ok(None),
        Some(Value::String(s)) if !s.is_empty() => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::EmptyField { field }),
    }
}
