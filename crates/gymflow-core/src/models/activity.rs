//! Activity log model — append-only audit trail of tenant mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened. Stored as a snake_case string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    SettingsUpdated,
    RoleCreated,
    RoleUpdated,
    RoleDeleted,
    AdminCreated,
    AdminUpdated,
    AdminDeleted,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::SettingsUpdated => "settings_updated",
            ActivityAction::RoleCreated => "role_created",
            ActivityAction::RoleUpdated => "role_updated",
            ActivityAction::RoleDeleted => "role_deleted",
            ActivityAction::AdminCreated => "admin_created",
            ActivityAction::AdminUpdated => "admin_updated",
            ActivityAction::AdminDeleted => "admin_deleted",
        }
    }
}

/// What kind of entity the action touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityEntity {
    Organization,
    Role,
    Admin,
}

impl ActivityEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityEntity::Organization => "organization",
            ActivityEntity::Role => "role",
            ActivityEntity::Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    /// Absent when the actor's organization could not be resolved.
    pub organization_id: Option<Uuid>,
    /// Identity-provider id of the acting user.
    pub actor_id: Uuid,
    pub actor_name: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub entity_name: Option<String>,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivityEntry {
    pub organization_id: Option<Uuid>,
    pub actor_id: Uuid,
    pub actor_name: String,
    pub action: ActivityAction,
    pub entity_type: ActivityEntity,
    pub entity_id: Option<String>,
    pub entity_name: Option<String>,
    pub details: Option<serde_json::Value>,
}
