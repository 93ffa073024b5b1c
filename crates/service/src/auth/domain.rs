use serde::{Deserialize, Serialize};

/// Accounts are addressed by their externally chosen identifier.
pub type AccountId = String;

/// Signup input. Field names follow the wire format (`id`, `name`).
/// Missing fields deserialize as empty and are rejected by validation.
#[derive(Clone, Default, Deserialize)]
pub struct SignupInput {
    #[serde(default, rename = "id")]
    pub identifier: String,
    #[serde(default, rename = "name")]
    pub display_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
}

/// Signin input
#[derive(Clone, Default, Deserialize)]
pub struct SigninInput {
    #[serde(default, rename = "id")]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

/// Stored account record, including derived credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub identifier: String,
    pub display_name: String,
    pub email: String,
    /// hex(PBKDF2 output)
    pub password_hash: String,
    /// hex(random bytes); its text is the KDF salt
    pub password_salt: String,
}

/// Values handed to the store when creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub identifier: String,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
}

impl From<NewAccount> for Account {
    fn from(n: NewAccount) -> Self {
        Account {
            identifier: n.identifier,
            display_name: n.display_name,
            email: n.email,
            password_hash: n.password_hash,
            password_salt: n.password_salt,
        }
    }
}

/// Read projection of an account; never carries hash or salt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    #[serde(rename = "id")]
    pub identifier: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub email: String,
}

impl From<&Account> for ProfileView {
    fn from(a: &Account) -> Self {
        ProfileView {
            identifier: a.identifier.clone(),
            display_name: a.display_name.clone(),
            email: a.email.clone(),
        }
    }
}

/// Signin result
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub account: ProfileView,
    pub token: String,
}
