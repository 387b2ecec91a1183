//! Unit tests for the review gateway and service over fake stores

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pizza_reviews_api::models::{NewReview, Rating, Review, ReviewChanges, ReviewDocument};
use pizza_reviews_api::services::{
    ReviewError, ReviewGateway, ReviewService, UpdateOutcome, ValidationError,
};
use pizza_reviews_api::storage::{InMemoryReviewStore, ReviewStore, StorageError, UpdateResult};
use std::sync::Arc;
use uuid::Uuid;

/// Store whose every operation fails as if the connection dropped.
struct FailingStore;

fn connection_lost() -> StorageError {
    StorageError::ConnectionError("connection reset by peer".to_string())
}

#[async_trait]
impl ReviewStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn find_all(&self) -> Result<Vec<Review>, StorageError> {
        Err(connection_lost())
    }

    async fn insert_one(&self, _document: ReviewDocument) -> Result<Uuid, StorageError> {
        Err(connection_lost())
    }

    async fn find_one(&self, _id: Uuid) -> Result<Option<Review>, StorageError> {
        Err(connection_lost())
    }

    async fn update_one(
        &self,
        _id: Uuid,
        _changes: &ReviewChanges,
        _updated_at: DateTime<Utc>,
    ) -> Result<UpdateResult, StorageError> {
        Err(connection_lost())
    }

    async fn delete_one(&self, _id: Uuid) -> Result<u64, StorageError> {
        Err(connection_lost())
    }
}

/// Store that finds documents but never reports a modification.
struct NeverModifiedStore;

#[async_trait]
impl ReviewStore for NeverModifiedStore {
    fn backend_name(&self) -> &'static str {
        "never-modified"
    }

    async fn find_all(&self) -> Result<Vec<Review>, StorageError> {
        Ok(Vec::new())
    }

    async fn insert_one(&self, _document: ReviewDocument) -> Result<Uuid, StorageError> {
        Ok(Uuid::new_v4())
    }

    async fn find_one(&self, _id: Uuid) -> Result<Option<Review>, StorageError> {
        Ok(None)
    }

    async fn update_one(
        &self,
        _id: Uuid,
        _changes: &ReviewChanges,
        _updated_at: DateTime<Utc>,
    ) -> Result<UpdateResult, StorageError> {
        Ok(UpdateResult {
            matched_count: 1,
            modified_count: 0,
        })
    }

    async fn delete_one(&self, _id: Uuid) -> Result<u64, StorageError> {
        Ok(0)
    }
}

fn sample(restaurant: Option<&str>) -> NewReview {
    NewReview {
        pizza_name: "Pepperoni".to_string(),
        rating: Rating::new(4).unwrap(),
        comment: "Crispy".to_string(),
        reviewer: "Dana".to_string(),
        restaurant: restaurant.map(str::to_string),
    }
}

fn memory_gateway() -> ReviewGateway {
    ReviewGateway::new(Arc::new(InMemoryReviewStore::new()))
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let gateway = memory_gateway();
    let id = gateway.create(sample(None)).await.unwrap();

    let review = gateway.get_by_id(&id.to_string()).await.unwrap();
    assert_eq!(review.id, id);
    assert_eq!(review.pizza_name, "Pepperoni");
    assert_eq!(review.rating.value(), 4);
    assert_eq!(review.comment, "Crispy");
    assert_eq!(review.reviewer, "Dana");
    assert_eq!(review.restaurant, "Unknown");
    assert_eq!(review.created_at, review.updated_at);
}

#[tokio::test]
async fn test_list_all_counts_reviews_in_insertion_order() {
    let gateway = memory_gateway();
    let first = gateway.create(sample(Some("A"))).await.unwrap();
    let second = gateway.create(sample(Some("B"))).await.unwrap();

    let list = gateway.list_all().await;
    assert!(list.error.is_none());
    assert_eq!(list.total, 2);
    assert_eq!(list.reviews[0].id, first);
    assert_eq!(list.reviews[1].id, second);
}

#[tokio::test]
async fn test_get_by_malformed_id_is_absent() {
    let gateway = memory_gateway();
    assert!(gateway.get_by_id("not-a-valid-id").await.is_none());
    assert!(gateway.get_by_id(&Uuid::new_v4().to_string()).await.is_none());
}

#[tokio::test]
async fn test_update_refreshes_timestamp_and_keeps_other_fields() {
    let gateway = memory_gateway();
    let id = gateway.create(sample(Some("Joe's"))).await.unwrap();
    let before = gateway.get_by_id(&id.to_string()).await.unwrap();

    let changes = ReviewChanges {
        rating: Rating::new(2),
        ..Default::default()
    };
    let status = gateway.update(&id.to_string(), changes).await.unwrap();
    assert!(status.success);
    assert!(status.matched);

    let after = gateway.get_by_id(&id.to_string()).await.unwrap();
    assert_eq!(after.rating.value(), 2);
    assert_eq!(after.pizza_name, before.pizza_name);
    assert_eq!(after.comment, before.comment);
    assert_eq!(after.reviewer, before.reviewer);
    assert_eq!(after.restaurant, "Joe's");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn test_repeated_updates_strictly_increase_updated_at() {
    let gateway = memory_gateway();
    let id = gateway.create(sample(None)).await.unwrap().to_string();

    let mut last = gateway.get_by_id(&id).await.unwrap().updated_at;
    for _ in 0..20 {
        gateway
            .update(&id, ReviewChanges::default())
            .await
            .unwrap();
        let current = gateway.get_by_id(&id).await.unwrap().updated_at;
        assert!(current > last);
        last = current;
    }
}

#[tokio::test]
async fn test_update_unknown_or_malformed_id() {
    let gateway = memory_gateway();
    let changes = ReviewChanges {
        comment: Some("x".to_string()),
        ..Default::default()
    };

    let status = gateway
        .update(&Uuid::new_v4().to_string(), changes.clone())
        .await
        .unwrap();
    assert!(!status.success);
    assert!(!status.matched);

    let status = gateway.update("12345", changes).await.unwrap();
    assert!(!status.success);
    assert!(!status.matched);
}

#[tokio::test]
async fn test_delete_succeeds_once() {
    let gateway = memory_gateway();
    let id = gateway.create(sample(None)).await.unwrap().to_string();

    assert!(gateway.delete(&id).await.unwrap().success);
    assert!(!gateway.delete(&id).await.unwrap().success);
    assert!(gateway.get_by_id(&id).await.is_none());
    assert!(!gateway.delete("garbage").await.unwrap().success);
}

#[tokio::test]
async fn test_list_degrades_to_empty_with_error_marker() {
    let gateway = ReviewGateway::new(Arc::new(FailingStore));
    let list = gateway.list_all().await;
    assert!(list.reviews.is_empty());
    assert_eq!(list.total, 0);
    assert_eq!(list.error, Some(connection_lost()));
}

#[tokio::test]
async fn test_get_storage_fault_is_absent() {
    let gateway = ReviewGateway::new(Arc::new(FailingStore));
    assert!(gateway.get_by_id(&Uuid::new_v4().to_string()).await.is_none());
}

#[tokio::test]
async fn test_write_faults_are_returned_not_raised() {
    let gateway = ReviewGateway::new(Arc::new(FailingStore));
    let id = Uuid::new_v4().to_string();

    assert!(gateway.create(sample(None)).await.is_err());
    assert!(gateway.update(&id, ReviewChanges::default()).await.is_err());
    assert!(gateway.delete(&id).await.is_err());
}

#[tokio::test]
async fn test_service_maps_list_fault_to_storage_error() {
    let service = ReviewService::with_store(Arc::new(FailingStore));
    assert_eq!(
        service.list_reviews().await.unwrap_err(),
        ReviewError::Storage(connection_lost())
    );
}

#[tokio::test]
async fn test_service_not_found_errors() {
    let service = ReviewService::with_store(Arc::new(InMemoryReviewStore::new()));
    let id = Uuid::new_v4().to_string();

    assert!(matches!(
        service.get_review(&id).await,
        Err(ReviewError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete_review(&id).await,
        Err(ReviewError::NotFound { .. })
    ));
    let changes = ReviewChanges {
        reviewer: Some("Kim".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        service.update_review(&id, changes).await,
        Err(ReviewError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_service_rejects_empty_changes() {
    let service = ReviewService::with_store(Arc::new(InMemoryReviewStore::new()));
    let id = service.create_review(sample(None)).await.unwrap().to_string();

    assert_eq!(
        service.update_review(&id, ReviewChanges::default()).await,
        Err(ReviewError::Validation(ValidationError::NoFieldsToUpdate))
    );
}

#[tokio::test]
async fn test_service_reports_unchanged_when_matched_but_not_modified() {
    let service = ReviewService::with_store(Arc::new(NeverModifiedStore));
    let changes = ReviewChanges {
        comment: Some("same".to_string()),
        ..Default::default()
    };
    assert_eq!(
        service
            .update_review(&Uuid::new_v4().to_string(), changes)
            .await,
        Ok(UpdateOutcome::Unchanged)
    );
}

#[tokio::test]
async fn test_service_update_modified() {
    let service = ReviewService::with_store(Arc::new(InMemoryReviewStore::new()));
    let id = service.create_review(sample(None)).await.unwrap().to_string();
    let changes = ReviewChanges {
        pizza_name: Some("Hawaiian".to_string()),
        ..Default::default()
    };

    assert_eq!(
        service.update_review(&id, changes).await,
        Ok(UpdateOutcome::Modified)
    );
    assert_eq!(service.get_review(&id).await.unwrap().pizza_name, "Hawaiian");
}

#[tokio::test]
async fn test_memory_store_update_with_identical_values_still_modifies() {
    let store = InMemoryReviewStore::new();
    let now = Utc::now();
    let id = store
        .insert_one(ReviewDocument::new(sample(None), now))
        .await
        .unwrap();
    let before = store.find_one(id).await.unwrap().unwrap();

    let same_rating = ReviewChanges {
        rating: Some(before.rating),
        ..Default::default()
    };
    let result = store.update_one(id, &same_rating, now).await.unwrap();
    assert_eq!(result.matched_count, 1);
    assert_eq!(result.modified_count, 1);

    let after = store.find_one(id).await.unwrap().unwrap();
    assert_eq!(after.rating, before.rating);
    assert!(after.updated_at > before.updated_at);
}
