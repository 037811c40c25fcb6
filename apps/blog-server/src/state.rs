//! Application state - shared across all handlers.

use std::sync::Arc;

use chrono::TimeDelta;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

use inkpost_core::ports::{AdminRepository, PostRepository, RateLimiter};
use inkpost_core::{PostService, SessionAuthenticator};
use inkpost_infra::{
    Argon2PasswordService, InMemoryCache, InMemoryRateLimiter, RandomSessionTokens,
    SqliteAdminRepository, SqlitePostRepository, connect, seed,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub auth: Arc<SessionAuthenticator>,
    pub login_limiter: Arc<dyn RateLimiter>,
    pub trust_proxy_headers: bool,
    pub cookie_secure: bool,
}

impl AppState {
    /// Connect to the configured database, migrate it and seed it.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db = connect(&config.database).await?;
        tracing::info!(max_connections = config.database.max_connections, "Database connected");

        Self::from_connection(db, config).await
    }

    /// Build the state on an existing connection, running pending migrations first.
    pub async fn from_connection(db: DatabaseConnection, config: &AppConfig) -> anyhow::Result<Self> {
        Migrator::up(&db, None).await?;

        let post_repo = Arc::new(SqlitePostRepository::new(db.clone()));
        let admin_repo = Arc::new(SqliteAdminRepository::new(db));

        let posts = PostService::new(post_repo.clone(), Arc::new(InMemoryCache::new()))
            .with_cache_ttl(config.view_cache_ttl);

        let auth = SessionAuthenticator::new(
            admin_repo.clone(),
            Arc::new(Argon2PasswordService::new()),
            Arc::new(RandomSessionTokens),
        )
        .with_session_ttl(TimeDelta::days(config.session.ttl_days));

        seed_database(&auth, admin_repo.as_ref(), post_repo.as_ref(), config).await?;

        let login_limiter = Arc::new(InMemoryRateLimiter::new(config.login_rate_limit.clone())?);

        tracing::info!("Application state initialized");

        Ok(Self {
            posts: Arc::new(posts),
            auth: Arc::new(auth),
            login_limiter,
            trust_proxy_headers: config.trust_proxy_headers,
            cookie_secure: config.session.cookie_secure,
        })
    }
}

async fn seed_database(
    auth: &SessionAuthenticator,
    admins: &dyn AdminRepository,
    posts: &dyn PostRepository,
    config: &AppConfig,
) -> anyhow::Result<()> {
    seed::seed_admin(
        auth,
        admins,
        &config.admin.username,
        config.admin.password.as_deref(),
    )
    .await?;

    if config.seed_sample_posts {
        seed::seed_sample_posts(posts).await?;
    }

    Ok(())
}
