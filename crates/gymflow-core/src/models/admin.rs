//! Admin record model — the UI-facing view of an organization member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminStatus {
    Active,
    Inactive,
}

impl AdminStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminStatus::Active => "active",
            AdminStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(AdminStatus::Active),
            "inactive" => Some(AdminStatus::Inactive),
            _ => None,
        }
    }
}

/// An entry in the tenant's admin directory.
///
/// Duplicates the membership relationship keyed by role id instead of
/// role name; see [`crate::models::membership`] for the pairing
/// invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRecord {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// Identity-provider user id (same key space as `Membership::user_id`).
    pub auth_user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role_id: Uuid,
    pub status: AdminStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminRecord {
    pub organization_id: Uuid,
    pub auth_user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role_id: Uuid,
    pub status: AdminStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateAdminRecord {
    pub name: Option<String>,
    pub role_id: Option<Uuid>,
    pub status: Option<AdminStatus>,
}
