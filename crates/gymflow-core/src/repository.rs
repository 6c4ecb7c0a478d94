//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Tenant-scoped repositories take
//! an `organization_id` parameter to enforce data isolation; the two
//! exceptions are noted on the methods themselves (membership lookup by
//! bare user id and organization lookup by email, both of which run
//! before the caller has an established tenant).
//!
//! Privilege levels are a deployment property of the handle behind an
//! implementation, not of the trait: the same trait is implemented by
//! caller-scoped connections (subject to row-level permissions) and by
//! the elevated connection (bypasses them). Services document which
//! level each of their repositories must carry.

use uuid::Uuid;

use crate::error::GymflowResult;
use crate::models::{
    activity::{ActivityEntry, CreateActivityEntry},
    admin::{AdminRecord, CreateAdminRecord, UpdateAdminRecord},
    membership::{CreateMembership, Membership},
    organization::{CreateOrganization, Organization, UpdateOrganization},
    role::{CreateRole, Role, UpdateRole},
};

pub trait OrganizationRepository: Send + Sync {
    /// Insert a new organization. A slug collision surfaces as
    /// [`GymflowError::AlreadyExists`](crate::error::GymflowError) —
    /// slug uniqueness is the store's responsibility, never pre-checked.
    fn create(
        &self,
        input: CreateOrganization,
    ) -> impl Future<Output = GymflowResult<Organization>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = GymflowResult<Organization>> + Send;

    /// Cross-tenant lookup by contact email, oldest first. Used by the
    /// repair workflow before the caller has a membership; requires an
    /// elevated handle.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = GymflowResult<Vec<Organization>>> + Send;

    fn update(
        &self,
        id: Uuid,
        input: UpdateOrganization,
    ) -> impl Future<Output = GymflowResult<Organization>> + Send;

    /// Hard delete. Only exercised by the provisioning rollback.
    fn delete(&self, id: Uuid) -> impl Future<Output = GymflowResult<()>> + Send;
}

pub trait RoleRepository: Send + Sync {
    fn create(&self, input: CreateRole) -> impl Future<Output = GymflowResult<Role>> + Send;

    fn get_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = GymflowResult<Role>> + Send;

    fn get_by_name(
        &self,
        organization_id: Uuid,
        name: &str,
    ) -> impl Future<Output = GymflowResult<Role>> + Send;

    fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        input: UpdateRole,
    ) -> impl Future<Output = GymflowResult<Role>> + Send;

    fn delete(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = GymflowResult<()>> + Send;

    /// All roles of an organization, ordered by name.
    fn list(&self, organization_id: Uuid) -> impl Future<Output = GymflowResult<Vec<Role>>> + Send;
}

pub trait MembershipRepository: Send + Sync {
    fn create(
        &self,
        input: CreateMembership,
    ) -> impl Future<Output = GymflowResult<Membership>> + Send;

    /// Tenant discovery: look up a membership by bare user id, first
    /// match by creation time. Assumes (does not enforce) one
    /// organization per user system-wide.
    fn get_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = GymflowResult<Membership>> + Send;

    fn get(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = GymflowResult<Membership>> + Send;

    /// Replace the denormalized role name on an existing membership.
    fn set_role(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        role: &str,
    ) -> impl Future<Output = GymflowResult<Membership>> + Send;

    fn delete(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = GymflowResult<()>> + Send;
}

pub trait AdminRepository: Send + Sync {
    fn create(
        &self,
        input: CreateAdminRecord,
    ) -> impl Future<Output = GymflowResult<AdminRecord>> + Send;

    fn get_by_id(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = GymflowResult<AdminRecord>> + Send;

    fn get_by_user(
        &self,
        organization_id: Uuid,
        auth_user_id: Uuid,
    ) -> impl Future<Output = GymflowResult<AdminRecord>> + Send;

    fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        input: UpdateAdminRecord,
    ) -> impl Future<Output = GymflowResult<AdminRecord>> + Send;

    fn delete(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = GymflowResult<()>> + Send;

    /// All admin records of an organization, newest first.
    fn list(
        &self,
        organization_id: Uuid,
    ) -> impl Future<Output = GymflowResult<Vec<AdminRecord>>> + Send;
}

/// Query bounds for activity log listings.
#[derive(Debug, Clone)]
pub struct ActivityFilter {
    pub from: Option<chrono::DateTime<chrono::Utc>>,
    /// Exclusive upper bound.
    pub to: Option<chrono::DateTime<chrono::Utc>>,
    pub limit: u64,
}

impl Default for ActivityFilter {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            limit: 20,
        }
    }
}

pub trait ActivityLogRepository: Send + Sync {
    /// Append a new entry. No update or delete operations exist.
    fn append(
        &self,
        input: CreateActivityEntry,
    ) -> impl Future<Output = GymflowResult<ActivityEntry>> + Send;

    /// Entries for an organization, newest first.
    fn list(
        &self,
        organization_id: Uuid,
        filter: ActivityFilter,
    ) -> impl Future<Output = GymflowResult<Vec<ActivityEntry>>> + Send;
}
