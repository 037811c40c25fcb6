//! In-memory stand-ins for the ports, used by service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::domain::{Admin, Post, StoredSession};
use crate::error::RepoError;
use crate::ports::{
    AdminRepository, AuthError, BaseRepository, Cache, PasswordService,
    PostRepository, SessionTokenService,
};

#[derive(Default)]
pub struct MemoryPosts {
    rows: Mutex<Vec<Post>>,
}

impl MemoryPosts {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseRepository<Post, String> for MemoryPosts {
    async fn find_by_id(&self, id: String) -> Result<Option<Post>, RepoError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: String) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryPosts {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint("duplicate id".to_string()));
        }
        rows.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        row.title = post.title;
        row.content = post.content;
        Ok(row.clone())
    }

    async fn insert_many(&self, posts: Vec<Post>) -> Result<(), RepoError> {
        self.rows.lock().unwrap().extend(posts);
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.len() as u64)
    }
}

/// Posts whose next listing stalls after reading its rows until released.
#[derive(Default)]
pub struct StallingPosts {
    pub inner: MemoryPosts,
    stall_next_list: AtomicBool,
    pub list_read: Notify,
    pub release_list: Notify,
}

impl StallingPosts {
    pub fn stall_next_list(&self) {
        self.stall_next_list.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl BaseRepository<Post, String> for StallingPosts {
    async fn find_by_id(&self, id: String) -> Result<Option<Post>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn delete(&self, id: String) -> Result<(), RepoError> {
        self.inner.delete(id).await
    }
}

#[async_trait]
impl PostRepository for StallingPosts {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let rows = self.inner.list_newest_first().await?;
        if self.stall_next_list.swap(false, Ordering::SeqCst) {
            self.list_read.notify_one();
            self.release_list.notified().await;
        }
        Ok(rows)
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.inner.insert(post).await
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        self.inner.update(post).await
    }

    async fn insert_many(&self, posts: Vec<Post>) -> Result<(), RepoError> {
        self.inner.insert_many(posts).await
    }

    async fn count(&self) -> Result<u64, RepoError> {
        self.inner.count().await
    }
}

#[derive(Default)]
pub struct MemoryAdmins {
    rows: Mutex<Vec<Admin>>,
}

impl MemoryAdmins {
    pub fn by_username(&self, username: &str) -> Option<Admin> {
        let rows = self.rows.lock().unwrap();
        rows.iter().find(|a| a.username == username).cloned()
    }
}

#[async_trait]
impl BaseRepository<Admin, Uuid> for MemoryAdmins {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, RepoError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|a| a.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl AdminRepository for MemoryAdmins {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, RepoError> {
        Ok(self.by_username(username))
    }

    async fn find_by_session_digest(&self, digest: &str) -> Result<Option<Admin>, RepoError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|a| a.session.as_ref().is_some_and(|s| s.token_digest == digest))
            .cloned())
    }

    async fn insert(&self, admin: Admin) -> Result<Admin, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|a| a.username == admin.username) {
            return Err(RepoError::Constraint("duplicate username".to_string()));
        }
        rows.push(admin.clone());
        Ok(admin)
    }

    async fn set_session(
        &self,
        id: Uuid,
        session: Option<StoredSession>,
    ) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let admin = rows
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RepoError::NotFound)?;
        admin.session = session;
        Ok(())
    }

    async fn clear_session_by_digest(&self, digest: &str) -> Result<u64, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let mut cleared = 0;
        for admin in rows.iter_mut() {
            if admin.session.as_ref().is_some_and(|s| s.token_digest == digest) {
                admin.session = None;
                cleared += 1;
            }
        }
        Ok(cleared)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }
}

/// Reversible "hash" so tests stay fast.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("plain:{password}"))
    }
}

#[derive(Default)]
pub struct SequentialTokens {
    next: AtomicU64,
}

impl SessionTokenService for SequentialTokens {
    fn generate(&self) -> String {
        format!("token-{}", self.next.fetch_add(1, Ordering::Relaxed))
    }

    fn digest(&self, token: &str) -> String {
        format!("digest:{token}")
    }
}

#[derive(Default)]
pub struct MapCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MapCache {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl Cache for MapCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    async fn delete(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}
