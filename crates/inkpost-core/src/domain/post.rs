use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, FieldError};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 100;
pub const CONTENT_MIN_CHARS: usize = 10;
pub const CONTENT_MAX_CHARS: usize = 5000;

/// Default excerpt length used by post listings.
pub const EXCERPT_CHARS: usize = 100;

/// Post entity - a published article with markdown content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post from a validated draft, stamped with the current time.
    pub fn new(draft: PostDraft) -> Self {
        Self::at(draft, Utc::now())
    }

    /// Create a new post with an explicit creation time.
    pub fn at(draft: PostDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(created_at),
            title: draft.title,
            content: draft.content,
            created_at,
        }
    }

    /// Replace the editable fields, keeping id and creation time.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.content = draft.content;
    }

    /// Shorten the content to at most `max_chars` characters on a word boundary.
    pub fn excerpt(&self, max_chars: usize) -> String {
        excerpt(&self.content, max_chars)
    }
}

/// Ids are the creation time in unix millis plus a short random suffix,
/// so two posts created in the same millisecond still differ.
fn generate_id(created_at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", created_at.timestamp_millis(), &suffix[..8])
}

fn excerpt(content: &str, max_chars: usize) -> String {
    let trimmed = content.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }

    let cut: String = trimmed.chars().take(max_chars).collect();
    let shortened = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };

    format!("{}...", shortened.trim_end())
}

/// Title and content submitted through the create or edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Check length bounds, collecting every failing field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();

        let title_len = self.title.chars().count();
        if title_len < TITLE_MIN_CHARS {
            errors.push(FieldError::new(
                "title",
                format!("Title must be at least {TITLE_MIN_CHARS} characters long."),
            ));
        } else if title_len > TITLE_MAX_CHARS {
            errors.push(FieldError::new(
                "title",
                format!("Title must not exceed {TITLE_MAX_CHARS} characters."),
            ));
        }

        let content_len = self.content.chars().count();
        if content_len < CONTENT_MIN_CHARS {
            errors.push(FieldError::new(
                "content",
                format!("Content must be at least {CONTENT_MIN_CHARS} characters long."),
            ));
        } else if content_len > CONTENT_MAX_CHARS {
            errors.push(FieldError::new(
                "content",
                format!("Content must not exceed {CONTENT_MAX_CHARS} characters."),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(err: DomainError) -> Vec<&'static str> {
        match err {
            DomainError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_draft() {
        let draft = PostDraft::new("Hello World", "This is my first post.");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let draft = PostDraft::new("abc", "a".repeat(CONTENT_MIN_CHARS));
        assert!(draft.validate().is_ok());

        let draft = PostDraft::new("t".repeat(TITLE_MAX_CHARS), "c".repeat(CONTENT_MAX_CHARS));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_rejects_short_and_long_fields() {
        let err = PostDraft::new("Hi", "too short").validate().unwrap_err();
        assert_eq!(fields(err), vec!["title", "content"]);

        let err = PostDraft::new("t".repeat(TITLE_MAX_CHARS + 1), "Long enough content")
            .validate()
            .unwrap_err();
        assert_eq!(fields(err), vec!["title"]);

        let err = PostDraft::new("Fine title", "c".repeat(CONTENT_MAX_CHARS + 1))
            .validate()
            .unwrap_err();
        assert_eq!(fields(err), vec!["content"]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Three characters, nine bytes.
        let draft = PostDraft::new("日本語", "ü".repeat(CONTENT_MIN_CHARS));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_id_derives_from_creation_time() {
        let created_at = DateTime::parse_from_rfc3339("2024-01-15T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let post = Post::at(PostDraft::new("Title", "Some content"), created_at);

        assert!(post.id.starts_with("1705312800000-"));
        assert_eq!(post.id.len(), "1705312800000-".len() + 8);
    }

    #[test]
    fn test_ids_are_unique_for_same_instant() {
        let now = Utc::now();
        let a = Post::at(PostDraft::new("Title", "Some content"), now);
        let b = Post::at(PostDraft::new("Title", "Some content"), now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut post = Post::new(PostDraft::new("Original", "Original content"));
        let (id, created_at) = (post.id.clone(), post.created_at);

        post.apply(PostDraft::new("Edited", "Edited content here"));

        assert_eq!(post.id, id);
        assert_eq!(post.created_at, created_at);
        assert_eq!(post.title, "Edited");
    }

    #[test]
    fn test_excerpt_short_content_is_untouched() {
        assert_eq!(excerpt("  short text  ", 100), "short text");
    }

    #[test]
    fn test_excerpt_breaks_on_word_boundary() {
        let content = "The quick brown fox jumps over the lazy dog";
        assert_eq!(excerpt(content, 12), "The quick...");
    }

    #[test]
    fn test_excerpt_without_spaces_hard_cuts() {
        assert_eq!(excerpt("abcdefghijklmnop", 5), "abcde...");
    }
}
