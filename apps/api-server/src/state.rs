//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::services::PostService;
use blog_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use blog_infra::{Database, PostgresPostRepository};

/// Which store is serving posts.
#[derive(Clone)]
pub enum Storage {
    #[cfg(feature = "postgres")]
    Postgres(Arc<Database>),
    Memory,
}

impl Storage {
    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "postgres")]
            Storage::Postgres(_) => "postgres",
            Storage::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub storage: Storage,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match Database::connect(config).await {
                    Ok(database) => {
                        let repo = PostgresPostRepository::new(database.conn.clone());
                        tracing::info!("Application state initialized (postgres)");
                        return Self {
                            posts: PostService::new(Arc::new(repo)),
                            storage: Storage::Postgres(Arc::new(database)),
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repository");
        }

        let state = Self::in_memory();
        tracing::info!("Application state initialized (memory)");
        state
    }

    /// State over an empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            posts: PostService::new(Arc::new(InMemoryPostRepository::new())),
            storage: Storage::Memory,
        }
    }
}
