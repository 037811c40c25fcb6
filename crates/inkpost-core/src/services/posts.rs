//! Post store - CRUD over the posts table with cached read views.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{Post, PostDraft, Viewer};
use crate::error::{DomainError, RepoError};
use crate::ports::{Cache, PostRepository};

const INDEX_KEY: &str = "posts:index";

fn detail_key(id: &str) -> String {
    format!("posts:detail:{id}")
}

/// Reads are open to everyone; every mutation requires an admin viewer and
/// invalidates the cached views it affects.
///
/// Each successful mutation bumps `generation` before invalidating. A read
/// fills the cache only with a view it fetched in the current generation, so
/// a slow read can never put back what a mutation just removed.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    cache: Arc<dyn Cache>,
    cache_ttl: Option<Duration>,
    generation: AtomicU64,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, cache: Arc<dyn Cache>) -> Self {
        Self {
            posts,
            cache,
            cache_ttl: None,
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// All posts, newest first.
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        if let Some(posts) = self.cached::<Vec<Post>>(INDEX_KEY).await {
            return Ok(posts);
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let posts = self.posts.list_newest_first().await?;
        self.store(INDEX_KEY, &posts, generation).await;
        Ok(posts)
    }

    pub async fn get(&self, id: &str) -> Result<Post, DomainError> {
        let key = detail_key(id);
        if let Some(post) = self.cached::<Post>(&key).await {
            return Ok(post);
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let post = self
            .posts
            .find_by_id(id.to_string())
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        self.store(&key, &post, generation).await;
        Ok(post)
    }

    pub async fn create(&self, viewer: &Viewer, draft: PostDraft) -> Result<Post, DomainError> {
        let admin = viewer.require_admin()?;
        draft.validate()?;

        let post = self.posts.insert(Post::new(draft)).await?;
        tracing::info!(post_id = %post.id, admin_id = %admin.id, "Post created");

        self.invalidate(&post.id).await;
        Ok(post)
    }

    pub async fn update(
        &self,
        viewer: &Viewer,
        id: &str,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let admin = viewer.require_admin()?;
        draft.validate()?;

        let mut post = self
            .posts
            .find_by_id(id.to_string())
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        post.apply(draft);

        let post = self
            .posts
            .update(post)
            .await
            .map_err(|e| not_found_as_domain(e, id))?;
        tracing::info!(post_id = %post.id, admin_id = %admin.id, "Post updated");

        self.invalidate(id).await;
        Ok(post)
    }

    pub async fn delete(&self, viewer: &Viewer, id: &str) -> Result<(), DomainError> {
        let admin = viewer.require_admin()?;

        self.posts
            .delete(id.to_string())
            .await
            .map_err(|e| not_found_as_domain(e, id))?;
        tracing::info!(post_id = %id, admin_id = %admin.id, "Post deleted");

        self.invalidate(id).await;
        Ok(())
    }

    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.cache.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding unreadable cache entry");
                None
            }
        }
    }

    /// Cache a view read during `generation`.
    async fn store<T: Serialize>(&self, key: &str, value: &T, generation: u64) {
        if self.generation.load(Ordering::SeqCst) != generation {
            return;
        }

        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to serialize view for cache");
                return;
            }
        };

        self.cache.set(key, &raw, self.cache_ttl).await;

        // A mutation that landed between the check above and the write may
        // have invalidated before our write did.
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(key = %key, "Dropping view cached across a mutation");
            self.cache.delete(key).await;
        }
    }

    async fn invalidate(&self, id: &str) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let detail = detail_key(id);
        self.cache.invalidate(&[INDEX_KEY, detail.as_str()]).await;
    }
}

fn not_found_as_domain(err: RepoError, id: &str) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => other.into(),
    }
}
