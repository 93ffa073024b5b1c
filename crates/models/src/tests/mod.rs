/// Account table round trips against a live database
pub mod account_tests {
    use crate::account::{self, NewAccount};
    use crate::db::connect;
    use crate::errors::ModelError;
    use migration::MigratorTrait;
    use anyhow::Result;
    use sea_orm::DatabaseConnection;
    use uuid::Uuid;

    async fn db_or_skip() -> Option<DatabaseConnection> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return None;
        }
        let db = match connect().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return None;
            }
        };
        if let Err(e) = migration::Migrator::up(&db, None).await {
            eprintln!("skip: migrate up failed: {}", e);
            return None;
        }
        Some(db)
    }

    fn new_account<'a>(identifier: &'a str) -> NewAccount<'a> {
        NewAccount {
            identifier,
            display_name: "Model Test",
            email: "model@example.com",
            password_hash: "aa",
            password_salt: "bb",
        }
    }

    #[tokio::test]
    async fn create_find_exists() -> Result<()> {
        let Some(db) = db_or_skip().await else { return Ok(()) };
        let identifier = format!("model_{}", Uuid::new_v4().simple());

        assert!(!account::exists(&db, &identifier).await?);
        let created = account::create(&db, new_account(&identifier)).await?;
        assert_eq!(created.identifier, identifier);
        assert!(account::exists(&db, &identifier).await?);

        let found = account::find_by_identifier(&db, &identifier).await?.expect("row present");
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_salt, "bb");

        account::hard_delete(&db, &identifier).await?;
        assert!(account::find_by_identifier(&db, &identifier).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn unique_index_reports_duplicate() -> Result<()> {
        let Some(db) = db_or_skip().await else { return Ok(()) };
        let identifier = format!("dup_{}", Uuid::new_v4().simple());

        account::create(&db, new_account(&identifier)).await?;
        let second = account::create(&db, new_account(&identifier)).await;
        assert!(matches!(second, Err(ModelError::Duplicate(ref id)) if *id == identifier));

        account::hard_delete(&db, &identifier).await?;
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_missing_hash() -> Result<()> {
        let Some(db) = db_or_skip().await else { return Ok(()) };
        let mut input = new_account("never_written");
        input.password_hash = "";
        let res = account::create(&db, input).await;
        assert!(matches!(res, Err(ModelError::Validation(_))));
        Ok(())
    }
}
