//! Application services - the operations the HTTP layer exposes.

mod posts;
mod session;

#[cfg(test)]
pub(crate) mod fakes;

pub use posts::PostService;
pub use session::{DEFAULT_SESSION_TTL_DAYS, IssuedSession, SessionAuthenticator};
