use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Admin entity - the privileged account allowed to manage posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub session: Option<StoredSession>,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    /// Create a new admin with generated ID and no active session.
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            session: None,
            created_at: Utc::now(),
        }
    }

    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// The single active session of an admin.
///
/// Only the digest of the token is persisted; the token itself lives in the
/// client's cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub token_digest: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Public view of an authenticated admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: Uuid,
    pub username: String,
}
