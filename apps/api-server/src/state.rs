//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::PostStore;
use blog_infra::InMemoryPostStore;
use blog_infra::database::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "postgres")]
use blog_infra::PostgresPostStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store when the
    /// database is not configured or unreachable.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    let posts = Arc::new(PostgresPostStore::new(conn.main.clone()));
                    Self {
                        posts,
                        db: Some(conn),
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory store");
            Self::in_memory()
        };

        tracing::info!("Application state initialized");
        state
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostStore::new()),
            db: None,
        }
    }
}
