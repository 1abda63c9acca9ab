//! AES-256-GCM implementation of the at-rest secret cipher.
//!
//! Ciphertext is `base64(AES-256-GCM(plaintext))` under a fixed nonce. The
//! fixed nonce makes encryption deterministic, which authentication relies
//! on (it compares ciphertexts). The trade-off is that equal secrets
//! produce equal ciphertexts; profiles are local files, not a vault.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use sha2::{Digest, Sha256};
use tracing::debug;

use adviport_core::secret::SecretCipher;

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// Built-in key used when no passphrase is configured.
const DEFAULT_KEY: [u8; KEY_LEN] = [
    0x64, 0x01, 0x6f, 0xe1, 0xbe, 0xa7, 0x51, 0xd6, 0xb9, 0x4b, 0xfa, 0xdc, 0x65, 0x8c, 0x4a, 0xfb,
    0x7e, 0xa9, 0x45, 0xc1, 0xfe, 0x12, 0xda, 0x4c, 0x2b, 0x5d, 0x59, 0x27, 0x8e, 0x78, 0x2a, 0x30,
];

const DEFAULT_NONCE: [u8; NONCE_LEN] = [
    0x65, 0x8c, 0x4a, 0xfb, 0x8e, 0x78, 0x2a, 0x30, 0x2b, 0x5d, 0x59, 0x27,
];

const KEY_DOMAIN: &[u8] = b"adviport:profile-key:v1";
const NONCE_DOMAIN: &[u8] = b"adviport:profile-nonce:v1";

/// Key material of an [`AesSecretCipher`].
#[derive(Clone, PartialEq, Eq)]
pub struct CipherKey {
    key: [u8; KEY_LEN],
    nonce: [u8; NONCE_LEN],
}

impl CipherKey {
    /// The embedded key and nonce.
    pub fn embedded() -> Self {
        Self {
            key: DEFAULT_KEY,
            nonce: DEFAULT_NONCE,
        }
    }

    /// Derives key and nonce from a passphrase with SHA-256.
    ///
    /// Profiles written under one passphrase can only be read back with the
    /// same passphrase.
    pub fn from_passphrase(passphrase: &str) -> Self {
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&derive(KEY_DOMAIN, passphrase));

        let nonce_digest = derive(NONCE_DOMAIN, passphrase);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&nonce_digest[..NONCE_LEN]);

        Self { key, nonce }
    }

    /// Passphrase-derived key if one is given and non-blank, else the embedded key.
    pub fn resolve(passphrase: Option<&str>) -> Self {
        match passphrase.map(str::trim).filter(|p| !p.is_empty()) {
            Some(passphrase) => {
                debug!("Using passphrase-derived profile cipher key");
                Self::from_passphrase(passphrase)
            }
            None => Self::embedded(),
        }
    }
}

impl Default for CipherKey {
    fn default() -> Self {
        Self::embedded()
    }
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CipherKey([REDACTED])")
    }
}

fn derive(domain: &[u8], passphrase: &str) -> sha2::digest::Output<Sha256> {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update([0u8]);
    hasher.update(passphrase.as_bytes());
    hasher.finalize()
}

/// Deterministic AES-256-GCM cipher producing base64 text.
pub struct AesSecretCipher {
    cipher: Aes256Gcm,
    nonce: [u8; NONCE_LEN],
}

impl AesSecretCipher {
    pub fn new(key: CipherKey) -> Self {
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key.key)),
            nonce: key.nonce,
        }
    }
}

impl Default for AesSecretCipher {
    fn default() -> Self {
        Self::new(CipherKey::embedded())
    }
}

impl SecretCipher for AesSecretCipher {
    fn encrypt(&self, plaintext: &str) -> Option<String> {
        let nonce = Nonce::from_slice(&self.nonce);
        match self.cipher.encrypt(nonce, plaintext.as_bytes()) {
            Ok(ciphertext) => Some(BASE64.encode(ciphertext)),
            Err(_) => {
                debug!("Secret encryption failed");
                None
            }
        }
    }

    fn decrypt(&self, ciphertext: &str) -> Option<String> {
        let bytes = BASE64.decode(ciphertext.trim()).ok()?;
        let nonce = Nonce::from_slice(&self.nonce);
        let plaintext = self.cipher.decrypt(nonce, bytes.as_ref()).ok()?;
        String::from_utf8(plaintext).ok()
    }
}
