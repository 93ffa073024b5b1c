use async_trait::async_trait;

use super::domain::{Account, AccountId, NewAccount};
use super::errors::StoreError;

/// Persistence boundary for accounts and their credentials.
///
/// `exists` is only a pre-check. Implementations must enforce identifier
/// uniqueness inside `create` and report a collision as `StoreError::Duplicate`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn exists(&self, identifier: &str) -> Result<bool, StoreError>;
    async fn create(&self, account: NewAccount) -> Result<AccountId, StoreError>;
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, StoreError>;
}

/// Simple in-memory mock store for tests, benches and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockCredentialStore {
        accounts: Mutex<HashMap<String, Account>>, // key: identifier
        offline: AtomicBool,
    }

    impl MockCredentialStore {
        /// Make every subsequent call fail with `StoreError::Unavailable`.
        pub fn set_offline(&self, offline: bool) {
            self.offline.store(offline, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.accounts.lock().map(|m| m.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn guard(&self) -> Result<MutexGuard<'_, HashMap<String, Account>>, StoreError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("mock store offline".into()));
            }
            self.accounts
                .lock()
                .map_err(|_| StoreError::Unavailable("mock store lock poisoned".into()))
        }
    }

    #[async_trait]
    impl CredentialStore for MockCredentialStore {
        async fn exists(&self, identifier: &str) -> Result<bool, StoreError> {
            Ok(self.guard()?.contains_key(identifier))
        }

        async fn create(&self, account: NewAccount) -> Result<AccountId, StoreError> {
            let mut accounts = self.guard()?;
            if accounts.contains_key(&account.identifier) {
                return Err(StoreError::Duplicate(account.identifier));
            }
            let id = account.identifier.clone();
            accounts.insert(id.clone(), account.into());
            Ok(id)
        }

        async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, StoreError> {
            Ok(self.guard()?.get(identifier).cloned())
        }
    }

}
