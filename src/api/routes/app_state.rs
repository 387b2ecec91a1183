//! Application state management.
//!
//! Defines the AppState struct shared by all route handlers. The review
//! store is chosen once at startup and injected here; nothing reaches it
//! through globals.

use crate::config::ServerConfig;
use crate::services::ReviewService;
use crate::storage::{InMemoryReviewStore, PostgresReviewStore, ReviewStore, StorageError};
use axum::extract::FromRef;
use std::sync::Arc;
use tracing::warn;

/// Application state shared across all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Review operations over the configured store
    pub review_service: ReviewService,
}

impl AppState {
    /// Create application state over an already constructed store.
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self {
            review_service: ReviewService::with_store(store),
        }
    }

    /// Create application state backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryReviewStore::new()))
    }

    /// Initialize the storage backend from configuration.
    ///
    /// Connects to PostgreSQL when `database_url` is set, otherwise falls
    /// back to the in-memory store.
    pub async fn from_config(config: &ServerConfig) -> Result<Self, StorageError> {
        match &config.database_url {
            Some(database_url) => {
                let store = PostgresReviewStore::connect(
                    database_url,
                    config.max_connections,
                    config.acquire_timeout,
                )
                .await?;
                Ok(Self::new(Arc::new(store)))
            }
            None => {
                warn!("DATABASE_URL not set; reviews are kept in memory and lost on exit");
                Ok(Self::in_memory())
            }
        }
    }

    /// Name of the active storage backend
    pub fn storage_backend(&self) -> &'static str {
        self.review_service.gateway().backend_name()
    }
}

// Allow handlers to extract the service directly
impl FromRef<AppState> for ReviewService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.review_service.clone()
    }
}
