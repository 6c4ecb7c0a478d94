//! Failure-injection tests for provisioning's compensating rollback.
//!
//! The wrappers below implement the core repository traits over the
//! real SurrealDB repositories, failing exactly one write so each
//! mid-workflow failure path can be driven deterministically.

use gymflow_core::error::{GymflowError, GymflowResult};
use gymflow_core::identity::Identity;
use gymflow_core::models::admin::{AdminRecord, CreateAdminRecord, UpdateAdminRecord};
use gymflow_core::models::membership::{CreateMembership, Membership};
use gymflow_core::models::role::{ADMIN_ROLE, BASIC_ROLE, CreateRole, Role, UpdateRole};
use gymflow_core::repository::{
    AdminRepository, MembershipRepository, OrganizationRepository, RoleRepository,
};
use gymflow_db::repository::{
    SurrealAdminRepository, SurrealMembershipRepository, SurrealOrganizationRepository,
    SurrealRoleRepository,
};
use gymflow_onboarding::{
    OnboardingError, ProvisionInput, ProvisionOutcome, ProvisioningService, RepairOutcome,
    RepairService,
};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn mem_db() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    gymflow_db::run_migrations(&db).await.unwrap();
    db
}

fn identity(email: &str) -> Identity {
    Identity {
        user_id: Uuid::new_v4(),
        email: email.into(),
        display_name: None,
    }
}

fn input(name: &str, slug: &str) -> ProvisionInput {
    ProvisionInput {
        name: name.into(),
        slug: slug.into(),
    }
}

async fn count_rows(db: &Surreal<Db>, table: &str) -> i64 {
    let mut result = db
        .query(format!("SELECT count() FROM {table} GROUP ALL"))
        .await
        .unwrap();
    let counts: Vec<i64> = result.take((0, "count")).unwrap();
    counts.first().copied().unwrap_or(0)
}

// -----------------------------------------------------------------------
// Failure-injecting wrappers
// -----------------------------------------------------------------------

/// Role repository whose `create` fails for one specific role name.
struct FailRoleCreate<R> {
    inner: R,
    fail_name: &'static str,
}

impl<R: RoleRepository> RoleRepository for FailRoleCreate<R> {
    async fn create(&self, role: CreateRole) -> GymflowResult<Role> {
        if role.name == self.fail_name {
            return Err(GymflowError::Database("injected role insert failure".into()));
        }
        self.inner.create(role).await
    }

    async fn get_by_id(&self, organization_id: Uuid, id: Uuid) -> GymflowResult<Role> {
        self.inner.get_by_id(organization_id, id).await
    }

    async fn get_by_name(&self, organization_id: Uuid, name: &str) -> GymflowResult<Role> {
        self.inner.get_by_name(organization_id, name).await
    }

    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        patch: UpdateRole,
    ) -> GymflowResult<Role> {
        self.inner.update(organization_id, id, patch).await
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> GymflowResult<()> {
        self.inner.delete(organization_id, id).await
    }

    async fn list(&self, organization_id: Uuid) -> GymflowResult<Vec<Role>> {
        self.inner.list(organization_id).await
    }
}

/// Membership repository whose `create` always fails.
struct FailMembershipCreate<M> {
    inner: M,
}

impl<M: MembershipRepository> MembershipRepository for FailMembershipCreate<M> {
    async fn create(&self, _input: CreateMembership) -> GymflowResult<Membership> {
        Err(GymflowError::Database(
            "injected membership insert failure".into(),
        ))
    }

    async fn get_by_user(&self, user_id: Uuid) -> GymflowResult<Membership> {
        self.inner.get_by_user(user_id).await
    }

    async fn get(&self, organization_id: Uuid, user_id: Uuid) -> GymflowResult<Membership> {
        self.inner.get(organization_id, user_id).await
    }

    async fn set_role(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        role: &str,
    ) -> GymflowResult<Membership> {
        self.inner.set_role(organization_id, user_id, role).await
    }

    async fn delete(&self, organization_id: Uuid, user_id: Uuid) -> GymflowResult<()> {
        self.inner.delete(organization_id, user_id).await
    }
}

/// Admin repository whose `create` always fails.
struct FailAdminCreate<A> {
    inner: A,
}

impl<A: AdminRepository> AdminRepository for FailAdminCreate<A> {
    async fn create(&self, _input: CreateAdminRecord) -> GymflowResult<AdminRecord> {
        Err(GymflowError::Database("injected admin insert failure".into()))
    }

    async fn get_by_id(&self, organization_id: Uuid, id: Uuid) -> GymflowResult<AdminRecord> {
        self.inner.get_by_id(organization_id, id).await
    }

    async fn get_by_user(
        &self,
        organization_id: Uuid,
        auth_user_id: Uuid,
    ) -> GymflowResult<AdminRecord> {
        self.inner.get_by_user(organization_id, auth_user_id).await
    }

    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        patch: UpdateAdminRecord,
    ) -> GymflowResult<AdminRecord> {
        self.inner.update(organization_id, id, patch).await
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> GymflowResult<()> {
        self.inner.delete(organization_id, id).await
    }

    async fn list(&self, organization_id: Uuid) -> GymflowResult<Vec<AdminRecord>> {
        self.inner.list(organization_id).await
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn admin_role_failure_rolls_back_the_organization() {
    let db = mem_db().await;
    let service = ProvisioningService::new(
        SurrealOrganizationRepository::new(db.clone()),
        FailRoleCreate {
            inner: SurrealRoleRepository::new(db.clone()),
            fail_name: ADMIN_ROLE,
        },
        SurrealMembershipRepository::new(db.clone()),
        SurrealAdminRepository::new(db.clone()),
    );
    let owner = identity("rollback@gym.com");

    let err = service
        .provision(Some(&owner), input("Gym", "rollback-gym"))
        .await
        .unwrap_err();
    assert!(matches!(err, OnboardingError::RoleSetupFailed(_)));

    // The half-provisioned organization was deleted.
    assert_eq!(count_rows(&db, "organization").await, 0);
    let memberships = SurrealMembershipRepository::new(db);
    assert!(memberships.get_by_user(owner.user_id).await.is_err());
}

#[tokio::test]
async fn basic_role_failure_is_ignored() {
    let db = mem_db().await;
    let service = ProvisioningService::new(
        SurrealOrganizationRepository::new(db.clone()),
        FailRoleCreate {
            inner: SurrealRoleRepository::new(db.clone()),
            fail_name: BASIC_ROLE,
        },
        SurrealMembershipRepository::new(db.clone()),
        SurrealAdminRepository::new(db.clone()),
    );
    let owner = identity("basico@gym.com");

    // Preserved asymmetry: the workflow completes without the read-only
    // role.
    let provisioned = service
        .provision(Some(&owner), input("Gym", "sin-basico"))
        .await
        .unwrap();
    assert_eq!(provisioned.outcome, ProvisionOutcome::Complete);

    let roles = SurrealRoleRepository::new(db);
    let all = roles.list(provisioned.organization.id).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, ADMIN_ROLE);
}

#[tokio::test]
async fn membership_failure_rolls_back_the_organization() {
    let db = mem_db().await;
    let service = ProvisioningService::new(
        SurrealOrganizationRepository::new(db.clone()),
        SurrealRoleRepository::new(db.clone()),
        FailMembershipCreate {
            inner: SurrealMembershipRepository::new(db.clone()),
        },
        SurrealAdminRepository::new(db.clone()),
    );
    let owner = identity("member-fail@gym.com");

    let err = service
        .provision(Some(&owner), input("Gym", "member-fail"))
        .await
        .unwrap_err();
    assert!(matches!(err, OnboardingError::MembershipFailed(_)));

    // Organization gone; role rows remain (documented limitation) but
    // are unreachable without their tenant.
    assert_eq!(count_rows(&db, "organization").await, 0);
    assert_eq!(count_rows(&db, "role").await, 2);
    assert_eq!(count_rows(&db, "admin").await, 0);
}

#[tokio::test]
async fn admin_record_failure_degrades_and_repair_converges() {
    let db = mem_db().await;
    let service = ProvisioningService::new(
        SurrealOrganizationRepository::new(db.clone()),
        SurrealRoleRepository::new(db.clone()),
        SurrealMembershipRepository::new(db.clone()),
        FailAdminCreate {
            inner: SurrealAdminRepository::new(db.clone()),
        },
    );
    let owner = identity("degraded@gym.com");

    // Step 5 failure is swallowed: the tenant is provisioned but marked
    // degraded, and the admin directory entry is missing.
    let provisioned = service
        .provision(Some(&owner), input("Gym", "degraded-gym"))
        .await
        .unwrap();
    assert!(matches!(provisioned.outcome, ProvisionOutcome::Degraded { .. }));

    let org_id = provisioned.organization.id;
    let admins = SurrealAdminRepository::new(db.clone());
    assert!(admins.get_by_user(org_id, owner.user_id).await.is_err());

    // Repair closes the gap and the cross-table invariant holds.
    let repair = RepairService::new(
        SurrealOrganizationRepository::new(db.clone()),
        SurrealRoleRepository::new(db.clone()),
        SurrealMembershipRepository::new(db.clone()),
        SurrealAdminRepository::new(db.clone()),
    );
    let report = repair.repair(Some(&owner)).await.unwrap();
    assert_eq!(report.membership, RepairOutcome::AlreadyExisted);
    assert_eq!(report.admin, RepairOutcome::Created);

    let admin = admins.get_by_user(org_id, owner.user_id).await.unwrap();
    let roles = SurrealRoleRepository::new(db.clone());
    let role = roles.get_by_id(org_id, admin.role_id).await.unwrap();
    assert_eq!(role.name, ADMIN_ROLE);

    let memberships = SurrealMembershipRepository::new(db);
    let membership = memberships.get(org_id, owner.user_id).await.unwrap();
    assert_eq!(membership.role, role.name);
}
