//! Application configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::time::Duration;

use inkpost_core::services::DEFAULT_SESSION_TTL_DAYS;
use inkpost_infra::{DatabaseConfig, RateLimitConfig};

const DEFAULT_VIEW_CACHE_TTL_SECS: u64 = 300;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    /// Lifetime of cached listing/detail views. `None` keeps them until invalidated.
    pub view_cache_ttl: Option<Duration>,
    pub admin: AdminSeedConfig,
    pub seed_sample_posts: bool,
    pub login_rate_limit: RateLimitConfig,
    /// Key the login limiter on `Forwarded` / `X-Forwarded-For` instead of
    /// the peer address. Only safe behind a proxy that overwrites them.
    pub trust_proxy_headers: bool,
}

/// Session lifetime and cookie flags.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ttl_days: i64,
    pub cookie_secure: bool,
}

/// Credentials for the admin created on first start.
#[derive(Clone)]
pub struct AdminSeedConfig {
    pub username: String,
    pub password: Option<String>,
}

impl fmt::Debug for AdminSeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSeedConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: DatabaseConfig::default(),
            session: SessionConfig {
                ttl_days: DEFAULT_SESSION_TTL_DAYS,
                cookie_secure: false,
            },
            view_cache_ttl: Some(Duration::from_secs(DEFAULT_VIEW_CACHE_TTL_SECS)),
            admin: AdminSeedConfig {
                username: "admin".to_string(),
                password: None,
            },
            seed_sample_posts: false,
            login_rate_limit: RateLimitConfig::default(),
            trust_proxy_headers: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let production = env::var("RUST_ENV").is_ok_and(|v| v == "production");

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
            max_connections: parse_var("DB_MAX_CONNECTIONS")
                .unwrap_or(defaults.database.max_connections),
            min_connections: parse_var("DB_MIN_CONNECTIONS")
                .unwrap_or(defaults.database.min_connections),
        };

        let session = SessionConfig {
            ttl_days: parse_var("SESSION_TTL_DAYS")
                .filter(|days: &i64| *days > 0)
                .unwrap_or(defaults.session.ttl_days),
            cookie_secure: flag_var("COOKIE_SECURE").unwrap_or(production),
        };

        let view_cache_ttl = match parse_var::<u64>("VIEW_CACHE_TTL_SECS") {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.view_cache_ttl,
        };

        let admin = AdminSeedConfig {
            username: env::var("ADMIN_USERNAME").unwrap_or(defaults.admin.username),
            password: env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
        };

        let login_rate_limit = RateLimitConfig {
            max_requests: parse_var("LOGIN_RATE_LIMIT_MAX")
                .unwrap_or(defaults.login_rate_limit.max_requests),
            window: parse_var("LOGIN_RATE_LIMIT_WINDOW_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.login_rate_limit.window),
        };

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT").unwrap_or(defaults.port),
            database,
            session,
            view_cache_ttl,
            admin,
            seed_sample_posts: flag_var("SEED_SAMPLE_POSTS").unwrap_or(false),
            login_rate_limit,
            trust_proxy_headers: flag_var("TRUST_PROXY_HEADERS").unwrap_or(false),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}

fn flag_var(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
}
