use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::auth::{AuthError, TokenError};
use thiserror::Error;
use tracing::{error, warn};

use crate::response::{fail, messages};

/// Request-level failure translated into the response envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("missing bearer token")]
    MissingToken,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    /// Status and client-visible message. Storage and internal details stay in the logs.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, format!("{}: {detail}", messages::INVALID_BODY)),
            ApiError::MissingToken => (StatusCode::BAD_REQUEST, messages::MISSING_TOKEN.into()),
            ApiError::Auth(e) => match e {
                AuthError::Validation(detail) => (StatusCode::BAD_REQUEST, format!("{}: {detail}", messages::NULL_VALUE)),
                AuthError::DuplicateIdentifier => (StatusCode::CONFLICT, messages::ALREADY_ID.into()),
                AuthError::UnknownAccount => (StatusCode::NOT_FOUND, messages::NO_USER.into()),
                AuthError::PasswordMismatch => (StatusCode::UNAUTHORIZED, messages::MISS_MATCH_PW.into()),
                AuthError::Token(TokenError::Expired) => (StatusCode::UNAUTHORIZED, messages::EXPIRED_TOKEN.into()),
                AuthError::Token(TokenError::InvalidSignature | TokenError::Malformed(_)) => {
                    (StatusCode::UNAUTHORIZED, messages::INVALID_TOKEN.into())
                }
                AuthError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, messages::DB_ERROR.into()),
                AuthError::Token(TokenError::Signing(_)) | AuthError::Internal(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL_ERROR.into())
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        match &self {
            ApiError::Auth(e) if !e.is_client_error() => {
                error!(code = e.code(), error = %e, "request failed");
            }
            ApiError::Auth(e) => {
                warn!(code = e.code(), error = %e, "request rejected");
            }
            other => {
                warn!(error = %other, "request rejected");
            }
        }
        fail(status, message).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(e: AuthError) -> StatusCode {
        ApiError::from(e).status_and_message().0
    }

    #[test]
    fn maps_each_kind_to_a_status() {
        assert_eq!(status(AuthError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(AuthError::DuplicateIdentifier), StatusCode::CONFLICT);
        assert_eq!(status(AuthError::UnknownAccount), StatusCode::NOT_FOUND);
        assert_eq!(status(AuthError::PasswordMismatch), StatusCode::UNAUTHORIZED);
        assert_eq!(status(TokenError::Expired.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(status(TokenError::InvalidSignature.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(status(AuthError::Storage("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn storage_detail_is_withheld() {
        let (_, msg) = ApiError::from(AuthError::Storage("password=hunter2 host=db".into())).status_and_message();
        assert_eq!(msg, messages::DB_ERROR);
    }
}
