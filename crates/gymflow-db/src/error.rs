//! Database-specific error types and conversions.

use gymflow_core::error::GymflowError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(surrealdb::Error),

    /// A UNIQUE index rejected a write (e.g., a duplicate organization
    /// slug or a second membership for the same `(org, user)` pair).
    #[error("Unique index violation: {0}")]
    UniqueViolation(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Row decode failed: {0}")]
    Decode(String),
}

impl From<surrealdb::Error> for DbError {
    fn from(err: surrealdb::Error) -> Self {
        // SurrealDB reports UNIQUE index violations as "Database index
        // `...` already contains ...". Both the query call and the
        // per-statement `.check()` can surface them.
        let msg = err.to_string();
        if msg.contains("already contains") {
            DbError::UniqueViolation(msg)
        } else {
            DbError::Surreal(err)
        }
    }
}

impl From<DbError> for GymflowError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => GymflowError::NotFound { entity, id },
            DbError::UniqueViolation(msg) => GymflowError::AlreadyExists(msg),
            other => GymflowError::Database(other.to_string()),
        }
    }
}
