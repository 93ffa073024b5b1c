//! Create `account` table holding identity and hashed credentials.
//!
//! `identifier` carries the unique index that rejects concurrent duplicate signups.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(uuid(Account::Id).primary_key())
                    .col(string_len(Account::Identifier, 64).not_null())
                    .col(string_len(Account::DisplayName, 128).not_null())
                    .col(string_len(Account::Email, 255).not_null())
                    // hex(32 bytes) for both
                    .col(string_len(Account::PasswordHash, 128).not_null())
                    .col(string_len(Account::PasswordSalt, 128).not_null())
                    .col(timestamp_with_time_zone(Account::CreatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_account_identifier")
                    .table(Account::Table)
                    .col(Account::Identifier)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uq_account_identifier").table(Account::Table).to_owned())
            .await?;
        manager.drop_table(Table::drop().table(Account::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
    Identifier,
    DisplayName,
    Email,
    PasswordHash,
    PasswordSalt,
    CreatedAt,
}
