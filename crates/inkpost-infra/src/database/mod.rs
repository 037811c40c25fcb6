//! Database connection management and repositories.

mod connections;

#[cfg(feature = "sqlite")]
pub mod entity;
#[cfg(feature = "sqlite")]
mod sea_base;
#[cfg(feature = "sqlite")]
mod sqlite_repo;

#[cfg(feature = "sqlite")]
pub use connections::connect;
pub use connections::DatabaseConfig;

#[cfg(feature = "sqlite")]
pub use sea_base::{DomainEntity, SeaRepository};
#[cfg(feature = "sqlite")]
pub use sqlite_repo::{SqliteAdminRepository, SqlitePostRepository};

#[cfg(all(feature = "sqlite", test))]
mod tests;
