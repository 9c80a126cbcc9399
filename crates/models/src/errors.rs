use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// Classify an insert failure, turning unique-constraint violations into `Conflict`.
    pub fn from_insert(err: DbErr, entity: &str) -> Self {
        let unique = matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
            || err.to_string().contains("UNIQUE constraint failed");
        if unique {
            Self::Conflict(format!("{entity} already exists"))
        } else {
            Self::Db(err.to_string())
        }
    }
}

impl From<DbErr> for ModelError {
    fn from(err: DbErr) -> Self {
        Self::Db(err.to_string())
    }
}
