//! Directory error types.

use gymflow_core::error::GymflowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("no authenticated caller")]
    NotAuthenticated,

    #[error("caller has no organization membership")]
    NoOrganization,

    #[error("caller's role does not allow: {action}")]
    PermissionDenied { action: &'static str },

    #[error("caller does not own this organization")]
    WrongOrganization,

    #[error(transparent)]
    Store(GymflowError),
}

impl DirectoryError {
    /// Short, user-facing Spanish message for the UI boundary.
    pub fn user_message(&self) -> String {
        match self {
            DirectoryError::NotAuthenticated => "No estás autenticado".into(),
            DirectoryError::NoOrganization => {
                "No se encontró organización para tu cuenta".into()
            }
            DirectoryError::PermissionDenied { action } => {
                format!("No tienes permisos para {action}")
            }
            DirectoryError::WrongOrganization => "No autorizado".into(),
            DirectoryError::Store(_) => "Ocurrió un error inesperado".into(),
        }
    }
}

impl From<GymflowError> for DirectoryError {
    fn from(err: GymflowError) -> Self {
        match err {
            GymflowError::NotAuthenticated => DirectoryError::NotAuthenticated,
            GymflowError::NoOrganization => DirectoryError::NoOrganization,
            other => DirectoryError::Store(other),
        }
    }
}
