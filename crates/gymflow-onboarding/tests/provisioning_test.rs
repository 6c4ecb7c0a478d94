//! Integration tests for the organization provisioning workflow using
//! in-memory SurrealDB.

use gymflow_core::access::resolve_access;
use gymflow_core::identity::Identity;
use gymflow_core::models::role::{ADMIN_ROLE, BASIC_ROLE};
use gymflow_core::permissions;
use gymflow_core::repository::{
    AdminRepository, MembershipRepository, OrganizationRepository, RoleRepository,
};
use gymflow_db::repository::{
    SurrealAdminRepository, SurrealMembershipRepository, SurrealOrganizationRepository,
    SurrealRoleRepository,
};
use gymflow_onboarding::{
    DASHBOARD_PATH, OnboardingError, ProvisionInput, ProvisionOutcome, ProvisioningService,
};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

type Service = ProvisioningService<
    SurrealOrganizationRepository<Db>,
    SurrealRoleRepository<Db>,
    SurrealMembershipRepository<Db>,
    SurrealAdminRepository<Db>,
>;

/// In-memory DB with migrations applied, plus a service over it.
async fn setup() -> (Surreal<Db>, Service) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    gymflow_db::run_migrations(&db).await.unwrap();

    let service = ProvisioningService::new(
        SurrealOrganizationRepository::new(db.clone()),
        SurrealRoleRepository::new(db.clone()),
        SurrealMembershipRepository::new(db.clone()),
        SurrealAdminRepository::new(db.clone()),
    );
    (db, service)
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

#[tokio::test]
async fn provision_creates_full_tenant() {
    let (db, service) = setup().await;
    let owner = identity("a@x.com");

    let provisioned = service
        .provision(Some(&owner), input("FitPro Platinum", "fitpro-platinum"))
        .await
        .unwrap();

    assert_eq!(provisioned.organization.slug, "fitpro-platinum");
    assert_eq!(provisioned.organization.name, "FitPro Platinum");
    assert_eq!(provisioned.organization.email, "a@x.com");
    assert_eq!(provisioned.outcome, ProvisionOutcome::Complete);
    assert_eq!(provisioned.redirect, DASHBOARD_PATH);

    let org_id = provisioned.organization.id;

    // Both default roles exist; "Admin" carries the whole catalog,
    // "Basico" only the view/dashboard subset.
    let roles = SurrealRoleRepository::new(db.clone());
    let all = roles.list(org_id).await.unwrap();
    assert_eq!(all.len(), 2);

    let admin_role = roles.get_by_name(org_id, ADMIN_ROLE).await.unwrap();
    assert_eq!(admin_role.id, provisioned.admin_role_id);
    assert_eq!(admin_role.permissions, permissions::admin_permission_ids());

    let basic_role = roles.get_by_name(org_id, BASIC_ROLE).await.unwrap();
    assert_eq!(basic_role.permissions, permissions::basic_permission_ids());
    assert!(basic_role.permissions.len() < admin_role.permissions.len());

    // The owner has a membership and a matching admin record.
    let memberships = SurrealMembershipRepository::new(db.clone());
    let membership = memberships.get(org_id, owner.user_id).await.unwrap();
    assert_eq!(membership.role, ADMIN_ROLE);

    let admins = SurrealAdminRepository::new(db);
    let admin = admins.get_by_user(org_id, owner.user_id).await.unwrap();
    assert_eq!(admin.role_id, admin_role.id);
    assert_eq!(admin.email, "a@x.com");
    assert_eq!(admin.name, "a"); // email local part, no profile name
}

#[tokio::test]
async fn duplicate_slug_is_rejected_and_leaves_no_orphans() {
    let (db, service) = setup().await;
    let first = identity("first@gym.com");
    let second = identity("second@gym.com");

    let provisioned = service
        .provision(Some(&first), input("Primer Gym", "mi-gym"))
        .await
        .unwrap();

    let err = service
        .provision(Some(&second), input("Segundo Gym", "mi-gym"))
        .await
        .unwrap_err();
    assert!(matches!(err, OnboardingError::DuplicateSlug));
    assert_eq!(
        err.user_message(),
        "Este identificador ya está en uso. Por favor elige otro."
    );

    // The failed attempt wrote nothing: one organization, the first
    // tenant's two roles, no membership for the second caller.
    let orgs = SurrealOrganizationRepository::new(db.clone());
    assert_eq!(orgs.find_by_email("second@gym.com").await.unwrap().len(), 0);

    let roles = SurrealRoleRepository::new(db.clone());
    assert_eq!(roles.list(provisioned.organization.id).await.unwrap().len(), 2);

    let memberships = SurrealMembershipRepository::new(db);
    assert!(memberships.get_by_user(second.user_id).await.is_err());
}

#[tokio::test]
async fn provision_requires_identity() {
    let (_db, service) = setup().await;

    let err = service
        .provision(None, input("Gym", "gym"))
        .await
        .unwrap_err();
    assert!(matches!(err, OnboardingError::NotAuthenticated));
}

#[tokio::test]
async fn provision_requires_name_and_slug() {
    let (_db, service) = setup().await;
    let owner = identity("a@x.com");

    let err = service
        .provision(Some(&owner), input("", "slug"))
        .await
        .unwrap_err();
    assert!(matches!(err, OnboardingError::MissingFields));

    let err = service
        .provision(Some(&owner), input("Gym", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, OnboardingError::MissingFields));
}

#[tokio::test]
async fn provision_uses_profile_display_name_for_admin_record() {
    let (db, service) = setup().await;
    let owner = Identity {
        user_id: Uuid::new_v4(),
        email: "ana@gym.com".into(),
        display_name: Some("Ana Torres".into()),
    };

    let provisioned = service
        .provision(Some(&owner), input("Gimnasio Ana", "gimnasio-ana"))
        .await
        .unwrap();

    let admins = SurrealAdminRepository::new(db);
    let admin = admins
        .get_by_user(provisioned.organization.id, owner.user_id)
        .await
        .unwrap();
    assert_eq!(admin.name, "Ana Torres");
}

#[tokio::test]
async fn second_provision_with_fresh_slug_is_not_idempotent() {
    let (db, service) = setup().await;
    let owner = identity("dup@gym.com");

    let first = service
        .provision(Some(&owner), input("Gym Uno", "gym-uno"))
        .await
        .unwrap();
    let second = service
        .provision(Some(&owner), input("Gym Dos", "gym-dos"))
        .await
        .unwrap();
    assert_ne!(first.organization.id, second.organization.id);

    // Documented limitation: both tenants exist, and access resolution
    // keeps answering with the earliest membership.
    let orgs = SurrealOrganizationRepository::new(db.clone());
    assert_eq!(orgs.find_by_email("dup@gym.com").await.unwrap().len(), 2);

    let memberships = SurrealMembershipRepository::new(db);
    let access = resolve_access(&memberships, Some(&owner)).await.unwrap();
    assert_eq!(access.organization_id, first.organization.id);
    assert_eq!(access.role, ADMIN_ROLE);
}
