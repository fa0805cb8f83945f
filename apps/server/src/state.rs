//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use review_core::picker::{ReviewerPicker, ThreadRngPicker};
use review_core::services::{PullRequestService, TeamService, UserService};
use review_core::store::{AssignmentStats, PullRequestStore, TeamStore, UserStore};
use review_core::{Error, Result};

use crate::config::Config;
use crate::db::PostgresStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub team_service: Arc<TeamService>,
    pub user_service: Arc<UserService>,
    pub pull_request_service: Arc<PullRequestService>,
    pub stats: Arc<dyn AssignmentStats>,
}

impl AppState {
    /// Initialize production state: connect to Postgres, run migrations,
    /// and wire the services over the Postgres store.
    pub async fn new(config: Config) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let pool = create_db_pool(&config).await?;

        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| Error::storage("run migrations", e))?;

        let store = Arc::new(PostgresStore::new(pool));
        Ok(Self::with_stores(
            Arc::new(config),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            Arc::new(ThreadRngPicker),
        ))
    }

    /// Wire the services over arbitrary store implementations. Used by the
    /// production path above and by router tests over the in-memory store.
    pub fn with_stores(
        config: Arc<Config>,
        teams: Arc<dyn TeamStore>,
        users: Arc<dyn UserStore>,
        pull_requests: Arc<dyn PullRequestStore>,
        stats: Arc<dyn AssignmentStats>,
        picker: Arc<dyn ReviewerPicker>,
    ) -> Self {
        Self {
            config,
            team_service: Arc::new(TeamService::new(teams, users.clone())),
            user_service: Arc::new(UserService::new(users.clone(), pull_requests.clone())),
            pull_request_service: Arc::new(PullRequestService::new(pull_requests, users, picker)),
            stats,
        }
    }
}

async fn create_db_pool(config: &Config) -> Result<PgPool> {
    tracing::info!("Creating database connection pool...");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .min_connections(config.database.pool_min_size)
        .max_connections(config.database.pool_max_size)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database.pool_timeout_seconds,
        ))
        .connect(&config.database.url)
        .await
        .map_err(|e| Error::storage("connect to database", e))?;

    tracing::info!(
        "Database pool created (min: {}, max: {})",
        config.database.pool_min_size,
        config.database.pool_max_size
    );

    Ok(pool)
}
