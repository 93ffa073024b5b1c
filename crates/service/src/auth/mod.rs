//! Auth module: domain types, credential store, password KDF, token issuer
//! and the orchestrating service.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod repo;
pub mod service;
pub mod token;

pub use errors::{AuthError, StoreError, TokenError};
pub use repository::CredentialStore;
pub use service::AuthService;
pub use token::{Claims, SigningKey, TokenIssuer, TokenSettings};
