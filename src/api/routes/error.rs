//! API error handling utilities.

use crate::services::{ReviewError, ValidationError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use tracing::error;

/// The review operation a handler performs; picks the client-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOperation {
    List,
    Create,
    Get,
    Update,
    Delete,
}

impl ReviewOperation {
    /// Generic 500 message; storage details never reach the client.
    pub fn failure_message(self) -> &'static str {
        match self {
            ReviewOperation::List => "Failed to fetch reviews",
            ReviewOperation::Create => "Failed to create review",
            ReviewOperation::Get => "Failed to fetch review",
            ReviewOperation::Update => "Failed to update review",
            ReviewOperation::Delete => "Failed to delete review",
        }
    }

    fn echoes_id_on_not_found(self) -> bool {
        matches!(self, ReviewOperation::Get | ReviewOperation::Update)
    }
}

/// API error response with a JSON body of `{"error": message, ...details}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Map<String, Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Map::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Add an extra field next to `error` in the body.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Map a service error to the response for `operation`.
    pub fn from_review_error(err: ReviewError, operation: ReviewOperation) -> Self {
        match err {
            ReviewError::Validation(v) => v.into(),
            ReviewError::NotFound { id } => {
                let api_error = ApiError::not_found("Review not found");
                if operation.echoes_id_on_not_found() {
                    api_error.with_detail("id", id)
                } else {
                    api_error
                }
            }
            ReviewError::Storage(e) => {
                error!(?operation, "Storage failure: {}", e);
                ApiError::internal(operation.failure_message())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let api_error = ApiError::bad_request(err.to_string());
        match err.detail() {
            Some((key, value)) => api_error.with_detail(key, value),
            None => api_error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(self.message));
        body.extend(self.details);

        (self.status, Json(Value::Object(body))).into_response()
    }
}
