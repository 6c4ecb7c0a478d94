//! Error types for the Gymflow system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GymflowError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Unique constraint violated: {0}")]
    AlreadyExists(String),

    #[error("No authenticated caller identity")]
    NotAuthenticated,

    #[error("Caller has no organization membership")]
    NoOrganization,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type GymflowResult<T> = Result<T, GymflowError>;
