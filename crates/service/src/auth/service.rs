use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{AccountId, AuthSession, NewAccount, ProfileView, SigninInput, SignupInput};
use super::errors::AuthError;
use super::password::PasswordHasher;
use super::repository::CredentialStore;
use super::token::{Claims, TokenIssuer};

/// Longest identifier the account table accepts.
pub const MAX_IDENTIFIER_LEN: usize = 64;
/// Column widths for the remaining profile fields.
pub const MAX_DISPLAY_NAME_LEN: usize = 128;
pub const MAX_EMAIL_LEN: usize = 255;

/// Auth business service independent of web framework
pub struct AuthService<R: CredentialStore + ?Sized> {
    store: Arc<R>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

fn require(field: &str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::Validation(format!("missing required field: {field}")));
    }
    Ok(())
}

fn require_bounded(field: &str, value: &str, max: usize) -> Result<(), AuthError> {
    require(field, value)?;
    if value.chars().count() > max {
        return Err(AuthError::Validation(format!("{field} longer than {max} characters")));
    }
    Ok(())
}

// Passwords are checked for emptiness only; surrounding spaces are part of the secret.
fn require_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::Validation("missing required field: password".into()));
    }
    Ok(())
}

impl<R: CredentialStore + ?Sized> AuthService<R> {
    pub fn new(store: Arc<R>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self { store, hasher, tokens }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Create an account with a freshly salted password hash.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, SigningKey, TokenIssuer, TokenSettings};
    /// use service::auth::domain::SignupInput;
    /// use service::auth::password::PasswordHasher;
    /// use service::auth::repository::mock::MockCredentialStore;
    /// let tokens = TokenIssuer::new(SigningKey::from_secret("secret").unwrap(), TokenSettings::default());
    /// let svc = AuthService::new(Arc::new(MockCredentialStore::default()), PasswordHasher::legacy(), tokens);
    /// let input = SignupInput { identifier: "alice".into(), display_name: "Alice".into(), password: "secret123".into(), email: "a@x.com".into() };
    /// let id = tokio_test::block_on(svc.signup(input)).unwrap();
    /// assert_eq!(id, "alice");
    /// ```
    #[instrument(skip(self, input), fields(identifier = %input.identifier))]
    pub async fn signup(&self, input: SignupInput) -> Result<AccountId, AuthError> {
        require_bounded("id", &input.identifier, MAX_IDENTIFIER_LEN)?;
        require_bounded("name", &input.display_name, MAX_DISPLAY_NAME_LEN)?;
        require_password(&input.password)?;
        require_bounded("email", &input.email, MAX_EMAIL_LEN)?;

        if self.store.exists(&input.identifier).await? {
            debug!("identifier already taken");
            return Err(AuthError::DuplicateIdentifier);
        }

        let hasher = self.hasher;
        let password = input.password;
        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password)).await?;

        // The store's uniqueness guard is authoritative; a racing signup lands here as Duplicate.
        let id = self
            .store
            .create(NewAccount {
                identifier: input.identifier,
                display_name: input.display_name,
                email: input.email,
                password_hash: hashed.hash,
                password_salt: hashed.salt,
            })
            .await
            .inspect_err(|e| warn!(error = %e, "account create failed"))?;

        info!(identifier = %id, "account_created");
        Ok(id)
    }

    /// Verify a password and issue a bearer token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthService, SigningKey, TokenIssuer, TokenSettings};
    /// use service::auth::domain::{SigninInput, SignupInput};
    /// use service::auth::password::PasswordHasher;
    /// use service::auth::repository::mock::MockCredentialStore;
    /// let tokens = TokenIssuer::new(SigningKey::from_secret("secret").unwrap(), TokenSettings::default());
    /// let svc = AuthService::new(Arc::new(MockCredentialStore::default()), PasswordHasher::legacy(), tokens);
    /// let _ = tokio_test::block_on(svc.signup(SignupInput { identifier: "u1".into(), display_name: "N".into(), password: "Passw0rd".into(), email: "u@e.com".into() }));
    /// let session = tokio_test::block_on(svc.signin(SigninInput { identifier: "u1".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.account.identifier, "u1");
    /// assert_eq!(svc.authenticate(&session.token).unwrap().sub, "u1");
    /// ```
    #[instrument(skip(self, input), fields(identifier = %input.identifier))]
    pub async fn signin(&self, input: SigninInput) -> Result<AuthSession, AuthError> {
        require("id", &input.identifier)?;
        require_password(&input.password)?;

        let account = self
            .store
            .find_by_identifier(&input.identifier)
            .await?
            .ok_or(AuthError::UnknownAccount)?;

        let hasher = self.hasher;
        let password = input.password;
        let salt = account.password_salt.clone();
        let stored = account.password_hash.clone();
        let matched = tokio::task::spawn_blocking(move || hasher.verify(&password, &salt, &stored)).await?;
        if !matched {
            warn!("password mismatch");
            return Err(AuthError::PasswordMismatch);
        }

        let token = self.tokens.sign(&account)?;
        info!(identifier = %account.identifier, "signin_succeeded");
        Ok(AuthSession { account: ProfileView::from(&account), token })
    }

    /// Public profile of an account.
    #[instrument(skip(self))]
    pub async fn get_profile(&self, identifier: &str) -> Result<ProfileView, AuthError> {
        require("id", identifier)?;
        let account = self
            .store
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::UnknownAccount)?;
        Ok(ProfileView::from(&account))
    }

    /// Check a bearer token and return its claims.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        Ok(self.tokens.verify(token)?)
    }
}
