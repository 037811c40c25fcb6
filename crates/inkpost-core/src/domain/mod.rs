//! Domain entities - the core business objects.

mod admin;
mod post;
mod viewer;

pub use admin::{Admin, AdminIdentity, StoredSession};
pub use post::{
    CONTENT_MAX_CHARS, CONTENT_MIN_CHARS, EXCERPT_CHARS, Post, PostDraft, TITLE_MAX_CHARS,
    TITLE_MIN_CHARS,
};
pub use viewer::Viewer;
