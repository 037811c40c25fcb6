#[cfg(feature = "sqlite")]
use std::time::Duration;

#[cfg(feature = "sqlite")]
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr};

/// Configuration for the embedded database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://blog.sqlite?mode=rwc".to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

impl DatabaseConfig {
    /// A private in-memory database. SQLite gives every connection its own
    /// memory database, so the pool is pinned to a single connection.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

/// Open the connection pool and apply SQLite pragmas.
#[cfg(feature = "sqlite")]
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false)
        .to_owned();

    let conn = Database::connect(opts).await?;

    if !config.is_in_memory() {
        conn.execute_unprepared("PRAGMA journal_mode = WAL").await?;
    }
    conn.execute_unprepared("PRAGMA foreign_keys = ON").await?;

    tracing::info!(
        pool = config.max_connections,
        in_memory = config.is_in_memory(),
        "Database connected"
    );

    Ok(conn)
}
