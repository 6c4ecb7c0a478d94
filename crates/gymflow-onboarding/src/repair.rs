//! Membership consistency repair — idempotent read-repair.
//!
//! Detects and fixes divergence between the membership table and the
//! admin directory for a single authenticated user. Every step is
//! insert-if-absent, so repeated calls converge. Past the identity and
//! organization checks nothing fails outright: downstream errors are
//! captured in the report as status values.

use gymflow_core::error::GymflowError;
use gymflow_core::identity::Identity;
use gymflow_core::models::admin::{AdminStatus, CreateAdminRecord};
use gymflow_core::models::membership::CreateMembership;
use gymflow_core::models::organization::Organization;
use gymflow_core::models::role::ADMIN_ROLE;
use gymflow_core::repository::{
    AdminRepository, MembershipRepository, OrganizationRepository, RoleRepository,
};
use tracing::warn;

use crate::error::OnboardingError;

/// Outcome of one insert-if-absent repair step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    AlreadyExisted,
    Created,
    CreationFailed(String),
    /// The `"Admin"` role is missing from the organization, so no
    /// admin record could be created.
    RoleNotFound,
}

/// What the repair run found and did, for display to the caller.
#[derive(Debug)]
pub struct RepairReport {
    /// The organization resolved from the caller's email.
    pub organization: Organization,
    pub membership: RepairOutcome,
    pub admin: RepairOutcome,
}

impl RepairReport {
    /// Spanish status line for the membership step.
    pub fn membership_status(&self) -> String {
        match &self.membership {
            RepairOutcome::AlreadyExisted => "Membresía ya existía.".into(),
            RepairOutcome::Created => "Membresía creada exitosamente.".into(),
            RepairOutcome::CreationFailed(e) => format!("Error creando membresía: {e}"),
            RepairOutcome::RoleNotFound => {
                "No se encontró el rol 'Admin' para asignar.".into()
            }
        }
    }

    /// Spanish status line for the admin record step.
    pub fn admin_status(&self) -> String {
        match &self.admin {
            RepairOutcome::AlreadyExisted => "Registro de admin ya existía.".into(),
            RepairOutcome::Created => "Registro de admin creado.".into(),
            RepairOutcome::CreationFailed(e) => format!("Error creando admin: {e}"),
            RepairOutcome::RoleNotFound => {
                "No se encontró el rol 'Admin' para asignar.".into()
            }
        }
    }
}

/// Membership repair service.
///
/// Like provisioning, every repository handle must be elevated: the
/// whole point of the workflow is that the caller's tenant rows may be
/// missing, which is exactly when caller-scoped policies lock it out.
pub struct RepairService<O, R, M, A>
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

impl<O, R, M, A> RepairService<O, R, M, A>
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

    /// Repair the caller's membership and admin records.
    ///
    /// Safe to call repeatedly; the second run reports both rows as
    /// already existing.
    pub async fn repair(
        &self,
        caller: Option<&Identity>,
    ) -> Result<RepairReport, OnboardingError> {
        // 1. Resolve the caller.
        let identity = caller.ok_or(OnboardingError::NotAuthenticated)?;

        // 2. Locate the organization by contact email, oldest first. A
        //    failed lookup degrades into the not-found outcome: the
        //    caller gets the guided "create organization" action either
        //    way.
        let organization = match self.organizations.find_by_email(&identity.email).await {
            Ok(organizations) => organizations.into_iter().next(),
            Err(e) => {
                warn!(email = %identity.email, error = %e, "Organization lookup failed");
                None
            }
        }
        .ok_or_else(|| OnboardingError::NoOrganizationFound {
            email: identity.email.clone(),
        })?;

        // 3. Membership: insert if absent.
        let membership = match self
            .memberships
            .get(organization.id, identity.user_id)
            .await
        {
            Ok(_) => RepairOutcome::AlreadyExisted,
            Err(GymflowError::NotFound { .. }) => {
                match self
                    .memberships
                    .create(CreateMembership {
                        organization_id: organization.id,
                        user_id: identity.user_id,
                        role: ADMIN_ROLE.into(),
                    })
                    .await
                {
                    Ok(_) => RepairOutcome::Created,
                    Err(e) => RepairOutcome::CreationFailed(e.to_string()),
                }
            }
            Err(e) => RepairOutcome::CreationFailed(e.to_string()),
        };

        // 4. Admin record: insert if absent, referencing the tenant's
        //    "Admin" role.
        let admin = match self.admins.get_by_user(organization.id, identity.user_id).await {
            Ok(_) => RepairOutcome::AlreadyExisted,
            Err(GymflowError::NotFound { .. }) => {
                match self.roles.get_by_name(organization.id, ADMIN_ROLE).await {
                    Ok(role) => {
                        match self
                            .admins
                            .create(CreateAdminRecord {
                                organization_id: organization.id,
                                auth_user_id: identity.user_id,
                                name: identity.preferred_name(),
                                email: identity.email.clone(),
                                role_id: role.id,
                                status: AdminStatus::Active,
                            })
                            .await
                        {
                            Ok(_) => RepairOutcome::Created,
                            Err(e) => RepairOutcome::CreationFailed(e.to_string()),
                        }
                    }
                    Err(GymflowError::NotFound { .. }) => RepairOutcome::RoleNotFound,
                    Err(e) => RepairOutcome::CreationFailed(e.to_string()),
                }
            }
            Err(e) => RepairOutcome::CreationFailed(e.to_string()),
        };

        // 5. Aggregate; downstream failures never propagate.
        Ok(RepairReport {
            organization,
            membership,
            admin,
        })
    }
}
