use sea_orm::{entity::prelude::*, DatabaseConnection, PaginatorTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;
use chrono::Utc;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub identifier: String,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a new row; hash and salt arrive already hex-encoded.
#[derive(Debug, Clone, Copy)]
pub struct NewAccount<'a> {
    pub identifier: &'a str,
    pub display_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub password_salt: &'a str,
}

/// Insert an account. A unique-index hit on `identifier` is reported as
/// `ModelError::Duplicate` so callers can tell it apart from other failures.
pub async fn create(db: &DatabaseConnection, new: NewAccount<'_>) -> Result<Model, ModelError> {
    if new.identifier.trim().is_empty() { return Err(ModelError::Validation("identifier required".into())); }
    if new.password_hash.is_empty() || new.password_salt.is_empty() {
        return Err(ModelError::Validation("password hash and salt required".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        identifier: Set(new.identifier.to_string()),
        display_name: Set(new.display_name.to_string()),
        email: Set(new.email.to_string()),
        password_hash: Set(new.password_hash.to_string()),
        password_salt: Set(new.password_salt.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ModelError::Duplicate(new.identifier.to_string()),
        _ => ModelError::Db(e.to_string()),
    })
}

pub async fn find_by_identifier(db: &DatabaseConnection, identifier: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Identifier.eq(identifier))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn exists(db: &DatabaseConnection, identifier: &str) -> Result<bool, ModelError> {
    let n = Entity::find()
        .filter(Column::Identifier.eq(identifier))
        .count(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(n > 0)
}

pub async fn hard_delete(db: &DatabaseConnection, identifier: &str) -> Result<(), ModelError> {
    Entity::delete_many()
        .filter(Column::Identifier.eq(identifier))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}
