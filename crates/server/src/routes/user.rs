use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use service::auth::domain::{SigninInput, SignupInput};

use super::auth::{ServerState, AUTH_COOKIE};
use crate::errors::ApiError;
use crate::response::{messages, success};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    pub user_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninData {
    pub access_token: String,
}

#[utoipa::path(post, path = "/user/signup", tag = "user", request_body = crate::openapi::SignupRequest,
    responses((status = 200, description = "Account created"), (status = 400, description = "Missing field"), (status = 409, description = "Identifier in use")))]
pub async fn signup(
    State(state): State<ServerState>,
    payload: Result<Json<SignupInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let user_id = state.auth.signup(input).await?;
    Ok(success(StatusCode::OK, messages::CREATED_USER, SignupData { user_id }))
}

#[utoipa::path(post, path = "/user/signin", tag = "user", request_body = crate::openapi::SigninRequest,
    responses((status = 200, description = "Signed in"), (status = 401, description = "Password mismatch"), (status = 404, description = "Unknown account")))]
pub async fn signin(
    State(state): State<ServerState>,
    jar: CookieJar,
    payload: Result<Json<SigninInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let session = state.auth.signin(input).await?;

    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);

    Ok((jar, success(StatusCode::OK, messages::LOGIN_SUCCESS, SigninData { access_token: session.token })))
}

#[utoipa::path(get, path = "/user/profile/{id}", tag = "user", params(("id" = String, Path, description = "Account identifier")),
    responses((status = 200, description = "Profile", body = crate::openapi::ProfileResponse), (status = 404, description = "Unknown account")))]
pub async fn profile(State(state): State<ServerState>, Path(id): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let profile = state.auth.get_profile(&id).await?;
    Ok(success(StatusCode::OK, messages::READ_PROFILE_SUCCESS, profile))
}
