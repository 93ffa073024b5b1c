//! Uniform JSON envelope: `{status, success, message, data?}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub mod messages {
    pub const NULL_VALUE: &str = "required value is missing";
    pub const INVALID_BODY: &str = "request body could not be parsed";

    pub const CREATED_USER: &str = "signup succeeded";
    pub const ALREADY_ID: &str = "identifier is already in use";

    pub const LOGIN_SUCCESS: &str = "signin succeeded";
    pub const NO_USER: &str = "account does not exist";
    pub const MISS_MATCH_PW: &str = "password does not match";

    pub const READ_PROFILE_SUCCESS: &str = "profile read succeeded";

    pub const MISSING_TOKEN: &str = "missing bearer token";
    pub const INVALID_TOKEN: &str = "invalid token";
    pub const EXPIRED_TOKEN: &str = "token expired";

    pub const DB_ERROR: &str = "database error";
    pub const INTERNAL_ERROR: &str = "internal error";
}

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: u16,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn success<T: Serialize>(status: StatusCode, message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    let body = Envelope { status: status.as_u16(), success: true, message: message.to_string(), data: Some(data) };
    (status, Json(body))
}

pub fn fail(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Envelope<()>>) {
    let body = Envelope { status: status.as_u16(), success: false, message: message.into(), data: None };
    (status, Json(body))
}
