//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod cache;
mod rate_limit;
mod repository;

pub use auth::{AuthError, PasswordService, SessionTokenService};
pub use cache::Cache;
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{AdminRepository, BaseRepository, PostRepository};
