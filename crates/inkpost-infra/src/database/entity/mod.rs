//! SeaORM entities for the `posts` and `admins` tables.

pub mod admin;
pub mod post;
