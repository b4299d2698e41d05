//! Session token generation and hashing.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated session tokens.
pub const TOKEN_LEN: usize = 48;

/// Generates a random alphanumeric session token (~286 bits of entropy).
pub fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Keyed hasher for session tokens.
///
/// Tokens are stored as HMAC-SHA256 digests so that read access to the
/// `sessions` table alone does not allow forging a cookie.
#[derive(Clone)]
pub struct TokenHasher {
    secret: Vec<u8>,
}

impl TokenHasher {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Returns the 64-character lowercase hex MAC of `token`.
    pub fn hash(&self, token: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Returns true if `token` looks like something [`generate_token`] produced.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LEN && token.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(is_well_formed(&token));
        assert_ne!(token, generate_token());
    }

    #[test]
    fn test_hash_is_stable_and_keyed() {
        let a = TokenHasher::new("secret-a");
        let b = TokenHasher::new("secret-b");

        assert_eq!(a.hash("tok"), a.hash("tok"));
        assert_eq!(a.hash("tok").len(), 64);
        assert_ne!(a.hash("tok"), a.hash("other"));
        assert_ne!(a.hash("tok"), b.hash("tok"));
    }

    #[test]
    fn test_is_well_formed_rejects_garbage() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("short"));
        assert!(!is_well_formed(&"!".repeat(TOKEN_LEN)));
    }
}
