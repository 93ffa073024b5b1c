use sea_orm::DatabaseConnection;

use models::account;
use models::errors::ModelError;

use crate::auth::domain::{Account, AccountId, NewAccount};
use crate::auth::errors::StoreError;
use crate::auth::repository::CredentialStore;

/// `CredentialStore` over the `account` table. The table's unique index on
/// `identifier` is what ultimately rejects racing signups.
#[derive(Clone)]
pub struct SeaOrmCredentialStore {
    pub db: DatabaseConnection,
}

impl SeaOrmCredentialStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

impl From<ModelError> for StoreError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Duplicate(id) => StoreError::Duplicate(id),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

fn to_domain(m: account::Model) -> Account {
    Account {
        identifier: m.identifier,
        display_name: m.display_name,
        email: m.email,
        password_hash: m.password_hash,
        password_salt: m.password_salt,
    }
}

#[async_trait::async_trait]
impl CredentialStore for SeaOrmCredentialStore {
    async fn exists(&self, identifier: &str) -> Result<bool, StoreError> {
        Ok(account::exists(&self.db, identifier).await?)
    }

    async fn create(&self, new: NewAccount) -> Result<AccountId, StoreError> {
        let created = account::create(
            &self.db,
            account::NewAccount {
                identifier: &new.identifier,
                display_name: &new.display_name,
                email: &new.email,
                password_hash: &new.password_hash,
                password_salt: &new.password_salt,
            },
        )
        .await?;
        Ok(created.identifier)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, StoreError> {
        Ok(account::find_by_identifier(&self.db, identifier).await?.map(to_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn new_account(identifier: &str) -> NewAccount {
        NewAccount {
            identifier: identifier.into(),
            display_name: "Store Test".into(),
            email: "store@example.com".into(),
            password_hash: "ab".repeat(32),
            password_salt: "cd".repeat(32),
        }
    }

    #[tokio::test]
    async fn seaorm_store_roundtrip_and_duplicate() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let store = SeaOrmCredentialStore::new(db.clone());
        let identifier = format!("store_{}", uuid::Uuid::new_v4().simple());

        assert!(!store.exists(&identifier).await?);
        assert_eq!(store.create(new_account(&identifier)).await?, identifier);
        assert!(store.exists(&identifier).await?);

        let found = store.find_by_identifier(&identifier).await?.expect("stored");
        assert_eq!(found.password_salt, "cd".repeat(32));

        let dup = store.create(new_account(&identifier)).await;
        assert_eq!(dup, Err(StoreError::Duplicate(identifier.clone())));

        account::hard_delete(&db, &identifier).await?;
        Ok(())
    }
}
