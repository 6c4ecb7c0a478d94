//! Caller identity supplied by the external identity provider.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated end user as seen by this system.
///
/// Authentication itself happens upstream; by the time a workflow runs,
/// the identity is either present (a verified user id and email) or
/// absent. Operations take `Option<&Identity>` and map the absent case
/// to [`GymflowError::NotAuthenticated`](crate::error::GymflowError).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque user id issued by the identity provider.
    pub user_id: Uuid,
    pub email: String,
    /// Display name from the provider's profile metadata, if any.
    pub display_name: Option<String>,
}

impl Identity {
    /// Best available display name: profile name, then the local part
    /// of the email, then the literal `"Admin"`.
    pub fn preferred_name(&self) -> String {
        if let Some(name) = &self.display_name
            && !name.is_empty()
        {
            return name.clone();
        }
        match self.email.split('@').next() {
            Some(local) if !local.is_empty() => local.to_string(),
            _ => "Admin".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(email: &str, name: Option<&str>) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            email: email.into(),
            display_name: name.map(Into::into),
        }
    }

    #[test]
    fn preferred_name_uses_profile_name_first() {
        let id = identity("ana@gym.com", Some("Ana Torres"));
        assert_eq!(id.preferred_name(), "Ana Torres");
    }

    #[test]
    fn preferred_name_falls_back_to_email_local_part() {
        let id = identity("ana@gym.com", None);
        assert_eq!(id.preferred_name(), "ana");

        let empty_name = identity("ana@gym.com", Some(""));
        assert_eq!(empty_name.preferred_name(), "ana");
    }

    #[test]
    fn preferred_name_falls_back_to_literal_admin() {
        let id = identity("@gym.com", None);
        assert_eq!(id.preferred_name(), "Admin");
    }
}
