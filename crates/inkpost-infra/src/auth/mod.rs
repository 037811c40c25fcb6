//! Authentication implementations.

mod password;
mod token;

pub use password::Argon2PasswordService;
pub use token::RandomSessionTokens;
