//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to start an admin session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of the create and edit forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
}

/// A full post, as shown on its detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A post as listed on the index page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a create, update or delete, with where the client should go next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMutationResponse {
    pub post: Option<PostResponse>,
    pub redirect_to: String,
}

impl PostMutationResponse {
    /// Points at the post's detail page.
    pub fn saved(post: PostResponse) -> Self {
        let redirect_to = format!("/posts/{}", post.id);
        Self {
            post: Some(post),
            redirect_to,
        }
    }

    /// Points back at the index.
    pub fn deleted() -> Self {
        Self {
            post: None,
            redirect_to: "/".to_string(),
        }
    }
}

/// Response to a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// Whether the caller currently holds an admin session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
