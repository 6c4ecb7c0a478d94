//! Organization membership model.
//!
//! A membership links an identity-provider user to an organization and
//! a role *name*. It is one half of a denormalized pair: the admin
//! record ([`crate::models::admin`]) stores the same relationship keyed
//! by role id, and every write path that touches one must reconcile the
//! other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub id: Uuid,
    pub organization_id: Uuid,
    /// Identity-provider user id.
    pub user_id: Uuid,
    /// Role name, denormalized (not a foreign key).
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMembership {
    pub organization_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
}
