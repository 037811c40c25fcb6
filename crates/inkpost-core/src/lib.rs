//! # Inkpost Core
//!
//! The domain layer of the Inkpost blog.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! posts and admins, the ports infrastructure implements, and the post store and
//! session authenticator services built on top of them.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::{PostService, SessionAuthenticator};
