//! Organization domain model.
//!
//! An organization is a gym account — the top-level tenant boundary for
//! all business data. Provisioning creates it; the only delete path is
//! the provisioning rollback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Human-readable gym name.
    pub name: String,
    /// URL-safe unique identifier (e.g., `fitpro-platinum`).
    pub slug: String,
    /// Contact email; provisioning defaults it to the owner's email,
    /// and the repair workflow locates the organization through it.
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub slug: String,
    pub email: String,
}

/// Fields that can be updated on an existing organization.
///
/// The slug is deliberately absent: it is the tenant's stable public
/// identifier and never changes after provisioning.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
