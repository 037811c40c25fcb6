//! Random session tokens and their stored digests.

use rand::Rng;
use sha2::{Digest, Sha256};

use inkpost_core::ports::SessionTokenService;

/// 32 random bytes, hex encoded; persisted as a SHA-256 hex digest.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSessionTokens;

impl SessionTokenService for RandomSessionTokens {
    fn generate(&self) -> String {
        let token: [u8; 32] = rand::thread_rng().r#gen();
        hex::encode(token)
    }

    fn digest(&self, token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_random_hex() {
        let tokens = RandomSessionTokens;
        let a = tokens.generate();
        let b = tokens.generate();

        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_is_stable_and_differs_from_token() {
        let tokens = RandomSessionTokens;
        let token = tokens.generate();

        assert_eq!(tokens.digest(&token), tokens.digest(&token));
        assert_ne!(tokens.digest(&token), token);
        assert_eq!(
            tokens.digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
