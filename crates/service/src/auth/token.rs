//! Bearer token issuance and verification (HS256 JWT).
//!
//! Verification is stateless: a token is trusted iff its signature checks out
//! under the process signing key, its issuer matches, and its `exp` (when
//! present) has not passed.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::domain::Account;
use super::errors::TokenError;

/// Claim set carried by issued tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// account identifier
    pub sub: String,
    pub name: String,
    pub email: String,
    pub iat: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    pub iss: String,
}

impl Claims {
    pub fn identifier(&self) -> &str {
        &self.sub
    }
}

/// HMAC secret shared by issuance and verification.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn from_secret(secret: impl AsRef<[u8]>) -> Result<Self, TokenError> {
        let bytes = secret.as_ref();
        if bytes.is_empty() {
            return Err(TokenError::Signing("empty signing key".into()));
        }
        Ok(Self(bytes.to_vec()))
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub issuer: String,
    /// `None` issues tokens without `exp`.
    pub ttl: Option<Duration>,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self { issuer: "account-auth".into(), ttl: Some(Duration::from_secs(12 * 60 * 60)) }
    }
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    settings: TokenSettings,
}

impl TokenIssuer {
    pub fn new(key: SigningKey, settings: TokenSettings) -> Self {
        Self {
            encoding: EncodingKey::from_secret(&key.0),
            decoding: DecodingKey::from_secret(&key.0),
            settings,
        }
    }

    /// Sign a token asserting `account`'s identity as of now.
    pub fn sign(&self, account: &Account) -> Result<String, TokenError> {
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        self.sign_at(account, now)
    }

    pub(crate) fn sign_at(&self, account: &Account, issued_at: u64) -> Result<String, TokenError> {
        let claims = Claims {
            sub: account.identifier.clone(),
            name: account.display_name.clone(),
            email: account.email.clone(),
            iat: issued_at,
            exp: self.settings.ttl.map(|ttl| issued_at.saturating_add(ttl.as_secs())),
            iss: self.settings.issuer.clone(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.settings.issuer.as_str()]);
        // exp is optional: checked when present
        validation.set_required_spec_claims(&["sub", "iss"]);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                other => TokenError::Malformed(format!("{other:?}")),
            })
    }
}
