//! Password derivation and verification.
//!
//! Hashes are PBKDF2-HMAC-SHA512 with a 32-byte output. The salt is 32 random
//! bytes stored as a 64-character hex string, and the *text* of that hex string
//! (not the decoded bytes) is fed to the KDF as the salt. Both hash and salt are
//! persisted as lowercase hex.
//!
//! Accounts created by the legacy deployment used a single iteration; a
//! `PasswordHasher` configured with `iterations = 1` verifies those records.

use std::num::NonZeroU32;

use common::crypto::{constant_time_eq, random_hex};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

/// Random salt length in bytes (before hex encoding).
pub const SALT_LEN: usize = 32;
/// Derived key length in bytes (before hex encoding).
pub const HASH_LEN: usize = 32;
/// Iteration count used when nothing is configured.
pub const DEFAULT_ITERATIONS: NonZeroU32 = match NonZeroU32::new(100_000) {
    Some(n) => n,
    None => unreachable!(),
};
/// Iteration count of records written by the legacy deployment.
pub const LEGACY_ITERATIONS: NonZeroU32 = NonZeroU32::MIN;

/// A freshly derived credential, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword {
    pub hash: String,
    pub salt: String,
}

/// KDF parameters. Cheap to copy into blocking tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    iterations: NonZeroU32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { iterations: DEFAULT_ITERATIONS }
    }
}

impl PasswordHasher {
    pub const fn new(iterations: NonZeroU32) -> Self {
        Self { iterations }
    }

    /// Parameters matching records written with a single iteration.
    pub const fn legacy() -> Self {
        Self { iterations: LEGACY_ITERATIONS }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations.get()
    }

    /// Generate a new salt and derive the hash for `password`.
    pub fn hash(&self, password: &str) -> HashedPassword {
        let salt = generate_salt();
        let hash = self.hash_with_salt(password, &salt);
        HashedPassword { hash, salt }
    }

    /// Derive the hex hash of `password` under an existing hex salt.
    pub fn hash_with_salt(&self, password: &str, salt: &str) -> String {
        hex::encode(derive(password, salt, self.iterations.get()))
    }

    /// Recompute with the stored salt and compare in constant time.
    /// A stored hash that is not valid hex never matches.
    pub fn verify(&self, password: &str, salt: &str, stored_hash: &str) -> bool {
        let Ok(expected) = hex::decode(stored_hash) else {
            return false;
        };
        let attempt = derive(password, salt, self.iterations.get());
        constant_time_eq(&attempt, &expected)
    }
}

/// 32 random bytes from the OS RNG, hex-encoded.
pub fn generate_salt() -> String {
    random_hex(SALT_LEN)
}

fn derive(password: &str, salt: &str, iterations: u32) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), iterations, &mut out);
    out
}
