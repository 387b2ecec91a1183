//! Review entity and the payload shapes that flow between layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Stored in place of a missing restaurant when a review is created.
pub const DEFAULT_RESTAURANT: &str = "Unknown";

/// Star rating, always within `Rating::MIN..=Rating::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Returns `None` when `value` falls outside the allowed range.
    pub fn new(value: i64) -> Option<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| {
            format!(
                "rating {} outside {}..={}",
                value,
                Rating::MIN,
                Rating::MAX
            )
        })
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted review as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub pizza_name: String,
    pub rating: Rating,
    pub comment: String,
    pub reviewer: String,
    pub restaurant: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Attach a store-assigned id to a document.
    pub fn from_document(id: Uuid, document: ReviewDocument) -> Self {
        Self {
            id,
            pizza_name: document.fields.pizza_name,
            rating: document.fields.rating,
            comment: document.fields.comment,
            reviewer: document.fields.reviewer,
            restaurant: document.fields.restaurant,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }

    /// Merge `changes` into this review. Returns true if any field changed.
    ///
    /// Timestamps are left alone; the store owns `updated_at`.
    pub fn apply(&mut self, changes: &ReviewChanges) -> bool {
        let mut changed = false;
        if let Some(pizza_name) = &changes.pizza_name {
            changed |= replace_if_different(&mut self.pizza_name, pizza_name);
        }
        if let Some(rating) = changes.rating.filter(|r| *r != self.rating) {
            self.rating = rating;
            changed = true;
        }
        if let Some(comment) = &changes.comment {
            changed |= replace_if_different(&mut self.comment, comment);
        }
        if let Some(reviewer) = &changes.reviewer {
            changed |= replace_if_different(&mut self.reviewer, reviewer);
        }
        if let Some(restaurant) = &changes.restaurant {
            changed |= replace_if_different(&mut self.restaurant, restaurant);
        }
        changed
    }
}

fn replace_if_different(slot: &mut String, value: &str) -> bool {
    if slot == value {
        false
    } else {
        *slot = value.to_string();
        true
    }
}

/// Validated input for creating a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub pizza_name: String,
    pub rating: Rating,
    pub comment: String,
    pub reviewer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<String>,
}

/// The content fields of a review as kept in the store's JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFields {
    pub pizza_name: String,
    pub rating: Rating,
    pub comment: String,
    pub reviewer: String,
    pub restaurant: String,
}

/// A normalized record ready for insertion. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDocument {
    pub fields: ReviewFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewDocument {
    /// Build the stored form of `review`, stamping both timestamps with `now`.
    ///
    /// A missing or empty restaurant becomes [`DEFAULT_RESTAURANT`].
    pub fn new(review: NewReview, now: DateTime<Utc>) -> Self {
        let restaurant = review
            .restaurant
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_RESTAURANT.to_string());

        Self {
            fields: ReviewFields {
                pizza_name: review.pizza_name,
                rating: review.rating,
                comment: review.comment,
                reviewer: review.reviewer,
                restaurant,
            },
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pizza_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<String>,
}

impl ReviewChanges {
    pub fn is_empty(&self) -> bool {
        self.pizza_name.is_none()
            && self.rating.is_none()
            && self.comment.is_none()
            && self.reviewer.is_none()
            && self.restaurant.is_none()
    }
}

/// Body of `GET /reviews`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewListResponse {
    pub reviews: Vec<Review>,
    pub total: usize,
}

/// Body of a successful `POST /reviews`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}

/// Body of a successful update or delete.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<bool>,
}

/// Error body shared by every failing route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
