use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Admin, Post, StoredSession};
use crate::error::RepoError;

/// Generic repository trait shared by every table.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Returns `RepoError::NotFound` if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository backed by the `posts` table.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, String> {
    /// All posts, newest `created_at` first.
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError>;

    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Overwrite title and content. Returns `RepoError::NotFound` for an unknown id.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Insert several posts in one transaction.
    async fn insert_many(&self, posts: Vec<Post>) -> Result<(), RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}

/// Admin repository backed by the `admins` table.
#[async_trait]
pub trait AdminRepository: BaseRepository<Admin, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, RepoError>;

    /// Find the admin whose active session has the given token digest.
    async fn find_by_session_digest(&self, digest: &str) -> Result<Option<Admin>, RepoError>;

    async fn insert(&self, admin: Admin) -> Result<Admin, RepoError>;

    /// Replace (or clear, with `None`) the single session stored for an admin.
    async fn set_session(&self, id: Uuid, session: Option<StoredSession>)
    -> Result<(), RepoError>;

    /// Clear whichever session matches the digest. Returns the number of admins touched.
    async fn clear_session_by_digest(&self, digest: &str) -> Result<u64, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}
