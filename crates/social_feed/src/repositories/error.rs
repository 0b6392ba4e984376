use thiserror::Error;

/// Storage layer error type.
///
/// Constraint violations reported by the database are classified so the
/// service layer can turn them into domain errors instead of opaque 500s.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database operation failed.
    #[error("database operation failed")]
    Database(#[source] sqlx::Error),

    /// A foreign key pointed at a user that does not exist.
    #[error("referenced user does not exist")]
    DanglingReference,

    /// A unique or check constraint rejected the write.
    #[error("conflicting record: {0}")]
    Conflict(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                StoreError::DanglingReference
            }
            sqlx::Error::Database(db) if db.is_unique_violation() || db.is_check_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
