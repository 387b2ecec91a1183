//! Review routes: CRUD over the review collection.

use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde_json::{Map, Value};
use tracing::debug;

use super::app_state::AppState;
use super::error::{ApiError, ReviewOperation};
use crate::models::{
    CreateReviewResponse, ErrorResponse, MessageResponse, NewReview, Review, ReviewChanges,
    ReviewListResponse,
};
use crate::services::{UpdateOutcome, ValidationError, parse_new_review, parse_review_changes};

/// Create the reviews router
pub fn reviews_router() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(list_reviews).post(create_review))
        // Use curly braces for path parameters in axum 0.8
        .route(
            "/reviews/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
}

/// Unwrap a JSON body, insisting on an object at the top level.
fn json_object(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, ApiError> {
    match body {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(Json(_)) => Err(ValidationError::NotAnObject.into()),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection);
            Err(ValidationError::NotAnObject.into())
        }
    }
}

/// GET /reviews - List every review
#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    tag = "Reviews",
    responses(
        (status = 200, description = "All reviews with their count", body = ReviewListResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<ReviewListResponse>, ApiError> {
    state
        .review_service
        .list_reviews()
        .await
        .map(Json)
        .map_err(|e| ApiError::from_review_error(e, ReviewOperation::List))
}

/// POST /reviews - Create a review
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    tag = "Reviews",
    request_body = NewReview,
    responses(
        (status = 201, description = "Review created", body = CreateReviewResponse),
        (status = 400, description = "Missing field, non-numeric rating or rating outside 1-5", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateReviewResponse>), ApiError> {
    let body = json_object(body)?;
    let review = parse_new_review(&body)?;

    let id = state
        .review_service
        .create_review(review)
        .await
        .map_err(|e| ApiError::from_review_error(e, ReviewOperation::Create))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReviewResponse {
            success: true,
            message: "Review created successfully".to_string(),
            id,
        }),
    ))
}

/// GET /reviews/{id} - Get a single review
#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    params(("id" = String, Path, description = "Review id")),
    responses(
        (status = 200, description = "The review", body = Review),
        (status = 404, description = "Unknown or malformed id", body = ErrorResponse)
    )
)]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Review>, ApiError> {
    state
        .review_service
        .get_review(&id)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_review_error(e, ReviewOperation::Get))
}

/// PUT /reviews/{id} - Update some fields of a review
#[utoipa::path(
    put,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    params(("id" = String, Path, description = "Review id")),
    request_body = ReviewChanges,
    responses(
        (status = 200, description = "Review updated, or found and left unchanged", body = MessageResponse),
        (status = 400, description = "Empty body, immutable field or invalid value", body = ErrorResponse),
        (status = 404, description = "Unknown or malformed id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let body = json_object(body)?;
    let changes = parse_review_changes(&body)?;

    let outcome = state
        .review_service
        .update_review(&id, changes)
        .await
        .map_err(|e| ApiError::from_review_error(e, ReviewOperation::Update))?;

    let (message, modified) = match outcome {
        UpdateOutcome::Modified => ("Review updated successfully", true),
        UpdateOutcome::Unchanged => ("Review unchanged", false),
    };

    Ok(Json(MessageResponse {
        success: true,
        message: message.to_string(),
        modified: Some(modified),
    }))
}

/// DELETE /reviews/{id} - Delete a review
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = "Reviews",
    params(("id" = String, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 404, description = "Unknown or malformed id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .review_service
        .delete_review(&id)
        .await
        .map_err(|e| ApiError::from_review_error(e, ReviewOperation::Delete))?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Review deleted successfully".to_string(),
        modified: None,
    }))
}
