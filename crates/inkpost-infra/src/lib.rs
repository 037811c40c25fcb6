//! # Inkpost Infrastructure
//!
//! Concrete implementations of the ports defined in `inkpost-core`:
//! SQLite storage, password hashing and session tokens, the view cache and
//! the login rate limiter.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory cache and seeding helpers only
//! - `sqlite` - SQLite storage via SeaORM
//! - `auth` - Argon2 password hashing + random session tokens
//! - `rate-limit` - Login rate limiting via governor

pub mod cache;
pub mod database;
pub mod seed;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use cache::InMemoryCache;
pub use database::DatabaseConfig;

#[cfg(feature = "sqlite")]
pub use database::{SqliteAdminRepository, SqlitePostRepository, connect};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, RandomSessionTokens};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
