use thiserror::Error;

/// Failures reported by a credential store implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The storage-level uniqueness guard rejected the identifier.
    #[error("identifier already stored: {0}")]
    Duplicate(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Token issuance and verification failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature mismatch")]
    InvalidSignature,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token expired")]
    Expired,
    /// Missing or unusable signing key; a configuration fault, not a client one.
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("identifier already in use")]
    DuplicateIdentifier,
    #[error("account does not exist")]
    UnknownAccount,
    #[error("password does not match")]
    PasswordMismatch,
    #[error("storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::DuplicateIdentifier => 1002,
            AuthError::UnknownAccount => 1003,
            AuthError::PasswordMismatch => 1004,
            AuthError::Token(TokenError::InvalidSignature) => 1101,
            AuthError::Token(TokenError::Malformed(_)) => 1102,
            AuthError::Token(TokenError::Expired) => 1103,
            AuthError::Token(TokenError::Signing(_)) => 1104,
            AuthError::Storage(_) => 1200,
            AuthError::Internal(_) => 1300,
        }
    }

    /// Whether the caller can fix the request and retry.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            AuthError::Storage(_) | AuthError::Internal(_) | AuthError::Token(TokenError::Signing(_))
        )
    }
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(_) => AuthError::DuplicateIdentifier,
            StoreError::Unavailable(msg) => AuthError::Storage(msg),
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(e: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("key derivation task failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_duplicate_maps_to_duplicate_identifier() {
        let e: AuthError = StoreError::Duplicate("alice".into()).into();
        assert!(matches!(e, AuthError::DuplicateIdentifier));
        assert_eq!(e.code(), 1002);
    }

    #[test]
    fn store_unavailable_maps_to_storage() {
        let e: AuthError = StoreError::Unavailable("connection refused".into()).into();
        assert!(matches!(e, AuthError::Storage(ref m) if m == "connection refused"));
        assert!(!e.is_client_error());
    }

    #[test]
    fn token_errors_are_client_errors_except_signing() {
        assert!(AuthError::from(TokenError::Expired).is_client_error());
        assert!(!AuthError::from(TokenError::Signing("no key".into())).is_client_error());
    }
}
