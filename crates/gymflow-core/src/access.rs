//! Access resolution — mapping a caller identity to its tenant.
//!
//! Every tenant-scoped operation starts here: the caller's organization
//! is unknown until the membership table is consulted by user id.

use crate::error::{GymflowError, GymflowResult};
use crate::identity::Identity;
use crate::repository::MembershipRepository;
use uuid::Uuid;

/// The caller's resolved tenant context.
#[derive(Debug, Clone)]
pub struct AccessContext {
    pub organization_id: Uuid,
    /// Denormalized role name from the membership row.
    pub role: String,
}

/// Resolve the calling user's organization and role.
///
/// Read-only. Fails with [`GymflowError::NotAuthenticated`] when no
/// identity is present and [`GymflowError::NoOrganization`] when the
/// user has no membership row. The lookup is by user id alone (first
/// match by creation time), which assumes a user belongs to at most one
/// organization system-wide.
pub async fn resolve_access<M: MembershipRepository>(
    memberships: &M,
    caller: Option<&Identity>,
) -> GymflowResult<AccessContext> {
    let identity = caller.ok_or(GymflowError::NotAuthenticated)?;

    let membership = memberships
        .get_by_user(identity.user_id)
        .await
        .map_err(|e| match e {
            GymflowError::NotFound { .. } => GymflowError::NoOrganization,
            other => other,
        })?;

    Ok(AccessContext {
        organization_id: membership.organization_id,
        role: membership.role,
    })
}
