//! Organization provisioning — tenant bootstrap orchestration.
//!
//! Creates the organization, its two default roles, the owner's
//! membership, and the owner's admin record, in that order. The store
//! offers no multi-statement transactions, so mid-workflow failures are
//! handled with compensating deletes of the organization row.

use gymflow_core::error::GymflowError;
use gymflow_core::identity::Identity;
use gymflow_core::models::admin::{AdminStatus, CreateAdminRecord};
use gymflow_core::models::membership::CreateMembership;
use gymflow_core::models::organization::{CreateOrganization, Organization};
use gymflow_core::models::role::{ADMIN_ROLE, BASIC_ROLE, CreateRole};
use gymflow_core::permissions;
use gymflow_core::repository::{
    AdminRepository, MembershipRepository, OrganizationRepository, RoleRepository,
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::OnboardingError;

/// Where a successful provisioning run sends the caller.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Input for the provisioning flow.
#[derive(Debug)]
pub struct ProvisionInput {
    pub name: String,
    pub slug: String,
}

/// Terminal state of a successful provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// All five writes landed.
    Complete,
    /// Organization, roles, and membership exist, but the admin record
    /// insert failed. The tenant is usable; the repair workflow
    /// restores the admin directory entry.
    Degraded { detail: String },
}

/// Successful provisioning result.
#[derive(Debug)]
pub struct Provisioned {
    pub organization: Organization,
    /// Id of the `"Admin"` role created for the new tenant.
    pub admin_role_id: Uuid,
    pub outcome: ProvisionOutcome,
    /// Redirect signal for the caller's UI layer.
    pub redirect: &'static str,
}

/// Organization provisioning service.
///
/// Generic over repository implementations so that the workflow layer
/// has no dependency on the database crate. Every repository handle
/// must be **elevated**: all five writes run before the caller has an
/// established tenant relationship, so caller-scoped row policies would
/// reject them.
pub struct ProvisioningService<O, R, M, A>
where
    O: OrganizationRepository,
    R: RoleRepository,
    M: MembershipRepository,
    A: AdminRepository,
{
    organizations: O,
    roles: R,
    memberships: M,
    admins: A,
}

impl<O, R, M, A> ProvisioningService<O, R, M, A>
where
    O: OrganizationRepository,
    R: RoleRepository,
    M: MembershipRepository,
    A: AdminRepository,
{
    pub fn new(organizations: O, roles: R, memberships: M, admins: A) -> Self {
        Self {
            organizations,
            roles,
            memberships,
            admins,
        }
    }

    /// Provision a new organization for the calling user.
    ///
    /// Not idempotent: a second call with a fresh slug creates a second
    /// organization and membership for the same user. Access resolution
    /// then keeps answering with the earliest membership.
    pub async fn provision(
        &self,
        caller: Option<&Identity>,
        input: ProvisionInput,
    ) -> Result<Provisioned, OnboardingError> {
        // 1. Validate identity and input.
        let identity = caller.ok_or(OnboardingError::NotAuthenticated)?;
        if input.name.is_empty() || input.slug.is_empty() {
            return Err(OnboardingError::MissingFields);
        }

        // 2. Insert the organization. Slug uniqueness is enforced by
        //    the store's UNIQUE index, not pre-checked here.
        let organization = self
            .organizations
            .create(CreateOrganization {
                name: input.name,
                slug: input.slug,
                email: identity.email.clone(),
            })
            .await
            .map_err(|e| match e {
                GymflowError::AlreadyExists(_) => OnboardingError::DuplicateSlug,
                other => OnboardingError::ProvisioningFailed(other.to_string()),
            })?;

        // 3. Create the two default roles. Both inserts are attempted;
        //    only the "Admin" insert is checked afterwards, a "Basico"
        //    failure leaves the tenant without its read-only role.
        let admin_role = self
            .roles
            .create(CreateRole {
                organization_id: organization.id,
                name: ADMIN_ROLE.into(),
                description: "Acceso total al sistema".into(),
                permissions: permissions::admin_permission_ids(),
            })
            .await;

        if let Err(e) = self
            .roles
            .create(CreateRole {
                organization_id: organization.id,
                name: BASIC_ROLE.into(),
                description: "Acceso de lectura y limitado".into(),
                permissions: permissions::basic_permission_ids(),
            })
            .await
        {
            warn!(
                organization_id = %organization.id,
                error = %e,
                "Basic role insert failed, continuing without it"
            );
        }

        let admin_role = match admin_role {
            Ok(role) => role,
            Err(e) => {
                self.rollback_organization(organization.id).await;
                return Err(OnboardingError::RoleSetupFailed(e.to_string()));
            }
        };

        // 4. Insert the owner membership. On failure the organization
        //    is rolled back; the role rows are not (residual rows are
        //    unreachable once the organization is gone).
        if let Err(e) = self
            .memberships
            .create(CreateMembership {
                organization_id: organization.id,
                user_id: identity.user_id,
                role: ADMIN_ROLE.into(),
            })
            .await
        {
            self.rollback_organization(organization.id).await;
            return Err(OnboardingError::MembershipFailed(e.to_string()));
        }

        // 5. Insert the admin directory record. A failure here leaves
        //    the tenant usable but out of sync; it is reported as a
        //    degraded outcome rather than an error, and the repair
        //    workflow closes the gap.
        let outcome = match self
            .admins
            .create(CreateAdminRecord {
                organization_id: organization.id,
                auth_user_id: identity.user_id,
                name: identity.preferred_name(),
                email: identity.email.clone(),
                role_id: admin_role.id,
                status: AdminStatus::Active,
            })
            .await
        {
            Ok(_) => ProvisionOutcome::Complete,
            Err(e) => {
                warn!(
                    organization_id = %organization.id,
                    error = %e,
                    "Admin record insert failed, tenant provisioned degraded"
                );
                ProvisionOutcome::Degraded {
                    detail: e.to_string(),
                }
            }
        };

        // 6. Hand the redirect signal back to the UI layer.
        Ok(Provisioned {
            organization,
            admin_role_id: admin_role.id,
            outcome,
            redirect: DASHBOARD_PATH,
        })
    }

    /// Compensating action: delete the half-provisioned organization.
    async fn rollback_organization(&self, organization_id: Uuid) {
        if let Err(e) = self.organizations.delete(organization_id).await {
            error!(
                %organization_id,
                error = %e,
                "Rollback delete of organization failed"
            );
        }
    }
}
