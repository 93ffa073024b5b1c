use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("duplicate identifier: {0}")]
    Duplicate(String),
    #[error("database error: {0}")]
    Db(String),
}
