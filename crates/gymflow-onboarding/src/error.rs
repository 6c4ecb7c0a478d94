//! Onboarding error types.

use gymflow_core::error::GymflowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OnboardingError {
    #[error("no authenticated caller")]
    NotAuthenticated,

    #[error("name and slug are required")]
    MissingFields,

    #[error("organization slug is already taken")]
    DuplicateSlug,

    #[error("organization insert failed: {0}")]
    ProvisioningFailed(String),

    #[error("default role setup failed: {0}")]
    RoleSetupFailed(String),

    #[error("owner membership insert failed: {0}")]
    MembershipFailed(String),

    #[error("no organization found for email {email}")]
    NoOrganizationFound { email: String },
}

impl OnboardingError {
    /// Short, user-facing Spanish message for the UI boundary.
    pub fn user_message(&self) -> String {
        match self {
            OnboardingError::NotAuthenticated => "No estás autenticado".into(),
            OnboardingError::MissingFields => {
                "El nombre y el identificador son requeridos".into()
            }
            OnboardingError::DuplicateSlug => {
                "Este identificador ya está en uso. Por favor elige otro.".into()
            }
            OnboardingError::ProvisioningFailed(_) => "Error al crear la organización".into(),
            OnboardingError::RoleSetupFailed(_) => {
                "Error al configurar los roles iniciales".into()
            }
            OnboardingError::MembershipFailed(_) => {
                "Error al asignar el usuario a la organización".into()
            }
            OnboardingError::NoOrganizationFound { email } => {
                format!("No hay ninguna organización asociada a tu correo ({email}).")
            }
        }
    }
}

impl From<OnboardingError> for GymflowError {
    fn from(err: OnboardingError) -> Self {
        match err {
            OnboardingError::NotAuthenticated => GymflowError::NotAuthenticated,
            OnboardingError::NoOrganizationFound { .. } => GymflowError::NoOrganization,
            OnboardingError::MissingFields => GymflowError::Validation {
                message: err.to_string(),
            },
            OnboardingError::DuplicateSlug => GymflowError::AlreadyExists(err.to_string()),
            other => GymflowError::Internal(other.to_string()),
        }
    }
}
