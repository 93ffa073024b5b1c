//! Credential authentication core.
//! - Password derivation and verification (PBKDF2-HMAC-SHA512 over a hex salt).
//! - Signup / signin / profile workflows over an abstract credential store.
//! - Stateless bearer-token issuance and verification.

pub mod auth;
#[cfg(test)]
pub mod test_support;
