//! Secret handling: the at-rest cipher seam and redacted plaintext wrappers.

use std::fmt;

/// Symmetric cipher for secrets persisted in user profiles.
///
/// Implementations are pure transformations: no I/O, no logging of inputs.
/// Both directions fail soft and return `None` instead of an error, so a
/// corrupt ciphertext simply behaves like a non-matching one.
///
/// Encryption must be deterministic for a given key, because authentication
/// compares ciphertexts rather than decrypting the stored password.
pub trait SecretCipher: Send + Sync {
    /// Encrypts `plaintext` into printable ciphertext.
    ///
    /// # Returns
    ///
    /// - `Some(ciphertext)`: base64 text suitable for a profile file
    /// - `None`: encryption failed
    fn encrypt(&self, plaintext: &str) -> Option<String>;

    /// Decrypts ciphertext produced by [`SecretCipher::encrypt`].
    ///
    /// # Returns
    ///
    /// `None` for malformed encoding, a wrong key, or tampered data.
    fn decrypt(&self, ciphertext: &str) -> Option<String>;

    /// Checks a plaintext candidate against a stored ciphertext.
    ///
    /// The candidate is encrypted and compared in constant time.
    fn matches(&self, candidate: &str, stored_ciphertext: &str) -> bool {
        match self.encrypt(candidate) {
            Some(encrypted) => {
                timing_safe_equal(encrypted.as_bytes(), stored_ciphertext.as_bytes())
            }
            None => false,
        }
    }
}

/// Compares two byte slices without short-circuiting on the first difference.
pub fn timing_safe_equal(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut diff = 0u8;
    for (lhs, rhs) in left.iter().zip(right) {
        diff |= lhs ^ rhs;
    }
    diff == 0
}

/// A decrypted data-provider API key.
///
/// Formatting never prints the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key for building provider requests.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
