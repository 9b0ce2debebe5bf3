//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{AccountRepository, Cache, PostRepository, TokenService};
use quill_core::service::{AccountService, PostService};
use quill_infra::{Argon2PasswordService, InMemoryCache, InMemoryStore, JwtConfig, JwtTokenService};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub accounts: Arc<AccountService>,
    pub tokens: Arc<dyn TokenService>,
    /// Revoked refresh-token ids, keyed `revoked:<jti>`.
    pub revoked_tokens: Arc<dyn Cache>,
}

impl AppState {
    /// Build the application state, connecting to PostgreSQL when configured.
    pub async fn new(config: &AppConfig) -> Self {
        if let Some(state) = Self::with_postgres(config).await {
            return state;
        }

        if config.database.is_none() {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }
        Self::in_memory(config.jwt.clone())
    }

    #[cfg(feature = "postgres")]
    async fn with_postgres(config: &AppConfig) -> Option<Self> {
        let db_config = config.database.as_ref()?;
        match quill_infra::database::connect(db_config).await {
            Ok(conn) => {
                tracing::info!("Using PostgreSQL repositories");
                Some(Self::from_repositories(
                    Arc::new(quill_infra::PostgresAccountRepository::new(conn.clone())),
                    Arc::new(quill_infra::PostgresPostRepository::new(conn)),
                    config.jwt.clone(),
                ))
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                None
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn with_postgres(config: &AppConfig) -> Option<Self> {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        None
    }

    /// State backed entirely by process memory.
    pub fn in_memory(jwt: JwtConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::from_repositories(store.clone(), store, jwt)
    }

    fn from_repositories(
        accounts: Arc<dyn AccountRepository>,
        posts: Arc<dyn PostRepository>,
        jwt: JwtConfig,
    ) -> Self {
        let state = Self {
            posts: Arc::new(PostService::new(posts, accounts.clone())),
            accounts: Arc::new(AccountService::new(
                accounts,
                Arc::new(Argon2PasswordService::new()),
            )),
            tokens: Arc::new(JwtTokenService::new(jwt)),
            revoked_tokens: Arc::new(InMemoryCache::new()),
        };
        tracing::info!("Application state initialized");
        state
    }
}
