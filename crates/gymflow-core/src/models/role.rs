//! Role domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the full-access role every organization is provisioned with.
pub const ADMIN_ROLE: &str = "Admin";

/// Name of the read-mostly default role.
pub const BASIC_ROLE: &str = "Basico";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// Unique per organization. Membership rows reference roles by
    /// this name, admin records by [`Role::id`].
    pub name: String,
    pub description: String,
    /// Permission ids from the static catalog.
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    pub organization_id: Uuid,
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateRole {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
}
