//! Tenant directory management — roles, admin records, and settings.
//!
//! Every admin-record mutation reconciles the membership table so the
//! two denormalized representations of "who belongs to this gym and as
//! what" stay in step. Mutations are recorded in the activity log on a
//! best-effort basis.

use gymflow_core::access::{AccessContext, resolve_access};
use gymflow_core::error::GymflowError;
use gymflow_core::identity::Identity;
use gymflow_core::models::activity::{
    ActivityAction, ActivityEntity, ActivityEntry, CreateActivityEntry,
};
use gymflow_core::models::admin::{AdminRecord, AdminStatus, CreateAdminRecord, UpdateAdminRecord};
use gymflow_core::models::membership::CreateMembership;
use gymflow_core::models::organization::{Organization, UpdateOrganization};
use gymflow_core::models::role::{CreateRole, Role, UpdateRole};
use gymflow_core::repository::{
    ActivityFilter, ActivityLogRepository, AdminRepository, MembershipRepository,
    OrganizationRepository, RoleRepository,
};
use tracing::warn;
use uuid::Uuid;

use crate::error::DirectoryError;

/// Role name treated as the tenant owner; bypasses permission checks.
const OWNER_ROLE: &str = "owner";

/// Role name recorded on a membership when the referenced role row
/// cannot be resolved.
const FALLBACK_ROLE: &str = "member";

/// What the caller's role allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerPermissions {
    /// The owner role: every permission, implicitly.
    Owner,
    /// Explicit permission ids granted through the caller's role.
    Granted(Vec<String>),
}

impl CallerPermissions {
    pub fn allows(&self, permission: &str) -> bool {
        match self {
            CallerPermissions::Owner => true,
            CallerPermissions::Granted(ids) => ids.iter().any(|id| id == permission),
        }
    }
}

/// Input for creating a role within the caller's organization.
#[derive(Debug)]
pub struct CreateRoleInput {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

/// Input for creating an admin directory entry.
#[derive(Debug)]
pub struct CreateAdminInput {
    /// Identity-provider user id of the person being added.
    pub auth_user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role_id: Uuid,
    pub status: Option<AdminStatus>,
}

/// Tenant directory service.
///
/// The role, admin, organization, and activity repositories may be
/// caller-scoped; the membership repository must be elevated, because
/// membership rows are written on behalf of *other* users during
/// admin-record synchronization.
pub struct DirectoryService<O, R, M, A, L>
where
    O: OrganizationRepository,
    R: RoleRepository,
    M: MembershipRepository,
    A: AdminRepository,
    L: ActivityLogRepository,
{
    organizations: O,
    roles: R,
    memberships: M,
    admins: A,
    activity: L,
}

impl<O, R, M, A, L> DirectoryService<O, R, M, A, L>
where
    O: OrganizationRepository,
    R: RoleRepository,
    M: MembershipRepository,
    A: AdminRepository,
    L: ActivityLogRepository,
{
    pub fn new(organizations: O, roles: R, memberships: M, admins: A, activity: L) -> Self {
        Self {
            organizations,
            roles,
            memberships,
            admins,
            activity,
        }
    }

    // -------------------------------------------------------------------
    // Permissions
    // -------------------------------------------------------------------

    /// What the caller's role allows within their organization.
    pub async fn caller_permissions(
        &self,
        caller: Option<&Identity>,
    ) -> Result<CallerPermissions, DirectoryError> {
        let access = resolve_access(&self.memberships, caller).await?;
        self.permissions_for(&access).await
    }

    async fn permissions_for(
        &self,
        access: &AccessContext,
    ) -> Result<CallerPermissions, DirectoryError> {
        if access.role == OWNER_ROLE {
            return Ok(CallerPermissions::Owner);
        }

        match self
            .roles
            .get_by_name(access.organization_id, &access.role)
            .await
        {
            Ok(role) => Ok(CallerPermissions::Granted(role.permissions)),
            // A membership naming a role that no longer exists grants
            // nothing rather than failing the caller's request.
            Err(GymflowError::NotFound { .. }) => Ok(CallerPermissions::Granted(Vec::new())),
            Err(e) => Err(e.into()),
        }
    }

    async fn require_permission(
        &self,
        access: &AccessContext,
        permission: &str,
        action: &'static str,
    ) -> Result<(), DirectoryError> {
        let granted = self.permissions_for(access).await?;
        if granted.allows(permission) {
            Ok(())
        } else {
            Err(DirectoryError::PermissionDenied { action })
        }
    }

    // -------------------------------------------------------------------
    // Roles
    // -------------------------------------------------------------------

    pub async fn list_roles(&self, caller: Option<&Identity>) -> Result<Vec<Role>, DirectoryError> {
        let access = resolve_access(&self.memberships, caller).await?;
        Ok(self.roles.list(access.organization_id).await?)
    }

    pub async fn create_role(
        &self,
        caller: Option<&Identity>,
        input: CreateRoleInput,
    ) -> Result<Role, DirectoryError> {
        let identity = caller.ok_or(DirectoryError::NotAuthenticated)?;
        let access = resolve_access(&self.memberships, caller).await?;
        self.require_permission(&access, "roles.create", "crear roles")
            .await?;

        let role = self
            .roles
            .create(CreateRole {
                organization_id: access.organization_id,
                name: input.name,
                description: input.description,
                permissions: input.permissions,
            })
            .await?;

        self.log(
            identity,
            access.organization_id,
            ActivityAction::RoleCreated,
            ActivityEntity::Role,
            Some(role.id.to_string()),
            Some(role.name.clone()),
            None,
        )
        .await;

        Ok(role)
    }

    pub async fn update_role(
        &self,
        caller: Option<&Identity>,
        id: Uuid,
        input: UpdateRole,
    ) -> Result<Role, DirectoryError> {
        let identity = caller.ok_or(DirectoryError::NotAuthenticated)?;
        let access = resolve_access(&self.memberships, caller).await?;
        self.require_permission(&access, "roles.edit", "editar roles")
            .await?;

        let role = self.roles.update(access.organization_id, id, input).await?;

        self.log(
            identity,
            access.organization_id,
            ActivityAction::RoleUpdated,
            ActivityEntity::Role,
            Some(role.id.to_string()),
            Some(role.name.clone()),
            None,
        )
        .await;

        Ok(role)
    }

    pub async fn delete_role(
        &self,
        caller: Option<&Identity>,
        id: Uuid,
    ) -> Result<(), DirectoryError> {
        let identity = caller.ok_or(DirectoryError::NotAuthenticated)?;
        let access = resolve_access(&self.memberships, caller).await?;
        self.require_permission(&access, "roles.delete", "eliminar roles")
            .await?;

        self.roles.delete(access.organization_id, id).await?;

        self.log(
            identity,
            access.organization_id,
            ActivityAction::RoleDeleted,
            ActivityEntity::Role,
            Some(id.to_string()),
            None,
            None,
        )
        .await;

        Ok(())
    }

    // -------------------------------------------------------------------
    // Admin directory (dual-write with memberships)
    // -------------------------------------------------------------------

    pub async fn list_admins(
        &self,
        caller: Option<&Identity>,
    ) -> Result<Vec<AdminRecord>, DirectoryError> {
        let access = resolve_access(&self.memberships, caller).await?;
        Ok(self.admins.list(access.organization_id).await?)
    }

    /// Add a person to the admin directory and mirror the relationship
    /// into the membership table.
    pub async fn create_admin(
        &self,
        caller: Option<&Identity>,
        input: CreateAdminInput,
    ) -> Result<AdminRecord, DirectoryError> {
        let identity = caller.ok_or(DirectoryError::NotAuthenticated)?;
        let access = resolve_access(&self.memberships, caller).await?;
        let organization_id = access.organization_id;

        // Resolve the denormalized role name for the membership row.
        let role_name = self
            .resolve_role_name(organization_id, input.role_id)
            .await;

        let admin = self
            .admins
            .create(CreateAdminRecord {
                organization_id,
                auth_user_id: input.auth_user_id,
                name: input.name,
                email: input.email,
                role_id: input.role_id,
                status: input.status.unwrap_or(AdminStatus::Active),
            })
            .await?;

        self.sync_membership(organization_id, input.auth_user_id, &role_name)
            .await;

        self.log(
            identity,
            organization_id,
            ActivityAction::AdminCreated,
            ActivityEntity::Admin,
            Some(admin.id.to_string()),
            Some(admin.name.clone()),
            None,
        )
        .await;

        Ok(admin)
    }

    /// Update an admin record; a role change is propagated to the
    /// membership's denormalized role name.
    pub async fn update_admin(
        &self,
        caller: Option<&Identity>,
        id: Uuid,
        input: UpdateAdminRecord,
    ) -> Result<AdminRecord, DirectoryError> {
        let identity = caller.ok_or(DirectoryError::NotAuthenticated)?;
        let access = resolve_access(&self.memberships, caller).await?;
        let organization_id = access.organization_id;

        let role_changed = input.role_id;
        let admin = self.admins.update(organization_id, id, input).await?;

        if let Some(role_id) = role_changed
            && let Ok(role) = self.roles.get_by_id(organization_id, role_id).await
        {
            self.sync_membership(organization_id, admin.auth_user_id, &role.name)
                .await;
        }

        self.log(
            identity,
            organization_id,
            ActivityAction::AdminUpdated,
            ActivityEntity::Admin,
            Some(admin.id.to_string()),
            Some(admin.name.clone()),
            None,
        )
        .await;

        Ok(admin)
    }

    /// Remove an admin record and the matching membership row.
    pub async fn delete_admin(
        &self,
        caller: Option<&Identity>,
        id: Uuid,
    ) -> Result<(), DirectoryError> {
        let identity = caller.ok_or(DirectoryError::NotAuthenticated)?;
        let access = resolve_access(&self.memberships, caller).await?;
        let organization_id = access.organization_id;

        // Capture the user id before the row disappears.
        let auth_user_id = match self.admins.get_by_id(organization_id, id).await {
            Ok(admin) => Some(admin.auth_user_id),
            Err(GymflowError::NotFound { .. }) => None,
            Err(e) => return Err(e.into()),
        };

        self.admins.delete(organization_id, id).await?;

        if let Some(user_id) = auth_user_id
            && let Err(e) = self.memberships.delete(organization_id, user_id).await
        {
            warn!(
                %organization_id,
                %user_id,
                error = %e,
                "Membership delete during admin removal failed"
            );
        }

        self.log(
            identity,
            organization_id,
            ActivityAction::AdminDeleted,
            ActivityEntity::Admin,
            Some(id.to_string()),
            None,
            None,
        )
        .await;

        Ok(())
    }

    // -------------------------------------------------------------------
    // Organization settings
    // -------------------------------------------------------------------

    pub async fn get_settings(
        &self,
        caller: Option<&Identity>,
    ) -> Result<Organization, DirectoryError> {
        let access = resolve_access(&self.memberships, caller).await?;
        Ok(self.organizations.get_by_id(access.organization_id).await?)
    }

    /// Update the caller's organization. The explicit `organization_id`
    /// is cross-checked against the caller's resolved tenant.
    pub async fn update_settings(
        &self,
        caller: Option<&Identity>,
        organization_id: Uuid,
        input: UpdateOrganization,
    ) -> Result<Organization, DirectoryError> {
        let identity = caller.ok_or(DirectoryError::NotAuthenticated)?;
        let access = resolve_access(&self.memberships, caller).await?;
        if access.organization_id != organization_id {
            return Err(DirectoryError::WrongOrganization);
        }

        let mut changed: Vec<&str> = Vec::new();
        if input.name.is_some() {
            changed.push("name");
        }
        if input.email.is_some() {
            changed.push("email");
        }
        if input.phone.is_some() {
            changed.push("phone");
        }
        if input.address.is_some() {
            changed.push("address");
        }

        let organization = self.organizations.update(organization_id, input).await?;

        self.log(
            identity,
            organization_id,
            ActivityAction::SettingsUpdated,
            ActivityEntity::Organization,
            Some(organization_id.to_string()),
            Some(organization.name.clone()),
            Some(serde_json::json!({ "fields": changed })),
        )
        .await;

        Ok(organization)
    }

    // -------------------------------------------------------------------
    // Activity log
    // -------------------------------------------------------------------

    /// Recent activity for the caller's organization, newest first.
    pub async fn activity(
        &self,
        caller: Option<&Identity>,
        filter: ActivityFilter,
    ) -> Result<Vec<ActivityEntry>, DirectoryError> {
        let access = resolve_access(&self.memberships, caller).await?;
        Ok(self.activity.list(access.organization_id, filter).await?)
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    async fn resolve_role_name(&self, organization_id: Uuid, role_id: Uuid) -> String {
        match self.roles.get_by_id(organization_id, role_id).await {
            Ok(role) => role.name,
            Err(e) => {
                warn!(
                    %organization_id,
                    %role_id,
                    error = %e,
                    "Role lookup failed, recording fallback role name"
                );
                FALLBACK_ROLE.to_string()
            }
        }
    }

    /// Upsert the membership row mirroring an admin record. Failures
    /// are logged, not surfaced: the admin write already succeeded and
    /// the repair workflow can restore consistency later.
    async fn sync_membership(&self, organization_id: Uuid, user_id: Uuid, role_name: &str) {
        let result = match self.memberships.get(organization_id, user_id).await {
            Ok(_) => self
                .memberships
                .set_role(organization_id, user_id, role_name)
                .await
                .map(|_| ()),
            Err(GymflowError::NotFound { .. }) => self
                .memberships
                .create(CreateMembership {
                    organization_id,
                    user_id,
                    role: role_name.to_string(),
                })
                .await
                .map(|_| ()),
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            warn!(
                %organization_id,
                %user_id,
                error = %e,
                "Membership synchronization failed"
            );
        }
    }

    /// Best-effort activity logging; never fails the calling operation.
    async fn log(
        &self,
        identity: &Identity,
        organization_id: Uuid,
        action: ActivityAction,
        entity_type: ActivityEntity,
        entity_id: Option<String>,
        entity_name: Option<String>,
        details: Option<serde_json::Value>,
    ) {
        let actor_name = match &identity.display_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ if !identity.email.is_empty() => identity.email.clone(),
            _ => "Usuario".to_string(),
        };

        let entry = CreateActivityEntry {
            organization_id: Some(organization_id),
            actor_id: identity.user_id,
            actor_name,
            action,
            entity_type,
            entity_id,
            entity_name,
            details,
        };

        if let Err(e) = self.activity.append(entry).await {
            warn!(error = %e, "Failed to record activity log entry");
        }
    }
}
