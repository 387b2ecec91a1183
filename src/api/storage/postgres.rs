//! PostgreSQL storage backend implementation.
//!
//! Each review is a JSONB document in the `reviews` table, with the
//! timestamps kept in their own columns so updates can order them.

use super::{StorageError, traits::*};
use crate::models::{Review, ReviewChanges, ReviewDocument, ReviewFields};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// PostgreSQL storage backend implementation.
pub struct PostgresReviewStore {
    pool: PgPool,
}

impl PostgresReviewStore {
    /// Create a new PostgreSQL storage backend over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a bounded pool, run migrations and return the store.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await
            .map_err(|e| {
                StorageError::ConnectionError(format!("Failed to connect to database: {}", e))
            })?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StorageError::ConnectionError(format!("Migration failed: {}", e)))?;

        info!(max_connections, "Connected to PostgreSQL review store");
        Ok(Self::new(pool))
    }
}

fn review_from_row(row: &PgRow) -> Result<Review, StorageError> {
    let id: Uuid = row.try_get("id")?;
    let data: serde_json::Value = row.try_get("data")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

    let fields: ReviewFields = serde_json::from_value(data).map_err(|e| {
        StorageError::Serialization(format!("Failed to deserialize review {}: {}", id, e))
    })?;

    Ok(Review::from_document(
        id,
        ReviewDocument {
            fields,
            created_at,
            updated_at,
        },
    ))
}

#[async_trait]
impl ReviewStore for PostgresReviewStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_all(&self) -> Result<Vec<Review>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, data, created_at, updated_at
            FROM reviews
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(review_from_row).collect()
    }

    async fn insert_one(&self, document: ReviewDocument) -> Result<Uuid, StorageError> {
        let data = serde_json::to_value(&document.fields)?;

        let row = sqlx::query(
            r#"
            INSERT INTO reviews (data, created_at, updated_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(data)
        .bind(document.created_at)
        .bind(document.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get("id")?)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Review>, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, data, created_at, updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(review_from_row).transpose()
    }

    async fn update_one(
        &self,
        id: Uuid,
        changes: &ReviewChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateResult, StorageError> {
        let patch = serde_json::to_value(changes)?;

        let rows_affected = sqlx::query(
            r#"
            UPDATE reviews
            SET data = data || $2,
                updated_at = GREATEST($3, updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch)
        .bind(updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        // updated_at is rewritten on every match, so matched rows are modified rows
        Ok(UpdateResult {
            matched_count: rows_affected,
            modified_count: rows_affected,
        })
    }

    async fn delete_one(&self, id: Uuid) -> Result<u64, StorageError> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected)
    }
}
