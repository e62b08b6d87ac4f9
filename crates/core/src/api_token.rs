//! Static API token generation for the admin dashboard.
//!
//! The dashboard authenticates with `Authorization: Token <key>`. Only the
//! SHA-256 digest of the key is persisted; the plaintext is handed to the
//! caller once, at issue time.

use rand::Rng;

/// Length of a generated token key (alphanumeric characters).
pub const TOKEN_KEY_LENGTH: usize = 40;

/// A freshly issued token.
pub struct GeneratedApiToken {
    /// The plaintext key returned to the client.
    pub plaintext: String,
    /// SHA-256 hex digest stored in `api_tokens.key_hash`.
    pub hash: String,
}

/// Random alphanumeric string of `len` characters from the thread RNG.
pub fn random_key(len: usize) -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate a new random API token key.
pub fn generate_api_token() -> GeneratedApiToken {
    let key = random_key(TOKEN_KEY_LENGTH);
    let hash = hash_api_token(&key);
    GeneratedApiToken {
        plaintext: key,
        hash,
    }
}

/// Digest used to look an incoming key up by hash.
pub fn hash_api_token(key: &str) -> String {
    crate::hashing::sha256_hex(key.trim().as_bytes())
}
