use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use axum_extra::extract::cookie::CookieJar;

use service::auth::{AuthError, AuthService, Claims, CredentialStore, TokenError};

use crate::errors::ApiError;
use crate::response::{messages, success};

pub const AUTH_COOKIE: &str = "auth_token";

pub type SharedAuth = Arc<AuthService<dyn CredentialStore>>;

#[derive(Clone)]
pub struct ServerState {
    pub auth: SharedAuth,
}

/// Pull the bearer token from `Authorization`, falling back to the `auth_token` cookie.
fn bearer_token(req: &Request) -> Result<String, ApiError> {
    if let Some(value) = req.headers().get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AuthError::from(TokenError::Malformed("non-ascii Authorization header".into())))?;
        return match value.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(AuthError::from(TokenError::Malformed("expected Bearer scheme".into())).into()),
        };
    }
    CookieJar::from_headers(req.headers())
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingToken)
}

/// Reject requests without a valid token; 400 when absent, 401 when invalid or expired.
/// Verified claims are placed in request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    let token = bearer_token(&req).inspect_err(|e| tracing::warn!(path = %path, error = %e, "no usable bearer token"))?;
    let claims = state
        .auth
        .authenticate(&token)
        .inspect_err(|e| tracing::warn!(path = %path, error = %e, "token validation failed"))?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[utoipa::path(get, path = "/auth/me", tag = "auth",
    responses((status = 200, description = "Profile of the token subject", body = crate::openapi::ProfileResponse), (status = 400, description = "Missing token"), (status = 401, description = "Invalid or expired token")))]
pub async fn me(State(state): State<ServerState>, Extension(claims): Extension<Claims>) -> Result<impl IntoResponse, ApiError> {
    let profile = state.auth.get_profile(claims.identifier()).await?;
    Ok(success(StatusCode::OK, messages::READ_PROFILE_SUCCESS, profile))
}
