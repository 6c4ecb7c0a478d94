//! Integration tests for the append-only activity log repository.

use chrono::{Duration, Utc};
use gymflow_core::models::activity::{ActivityAction, ActivityEntity, CreateActivityEntry};
use gymflow_core::models::organization::CreateOrganization;
use gymflow_core::repository::{ActivityFilter, ActivityLogRepository, OrganizationRepository};
use gymflow_db::repository::{SurrealActivityLogRepository, SurrealOrganizationRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: in-memory DB with migrations and one organization.
async fn setup() -> (Surreal<surrealdb::engine::local::Db>, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    gymflow_db::run_migrations(&db).await.unwrap();

    let orgs = SurrealOrganizationRepository::new(db.clone());
    let org = orgs
        .create(CreateOrganization {
            name: "Audit Gym".into(),
            slug: "audit".into(),
            email: "audit@gym.com".into(),
        })
        .await
        .unwrap();
    (db, org.id)
}

fn entry(org_id: Uuid, action: ActivityAction, name: &str) -> CreateActivityEntry {
    CreateActivityEntry {
        organization_id: Some(org_id),
        actor_id: Uuid::new_v4(),
        actor_name: "Tester".into(),
        action,
        entity_type: ActivityEntity::Role,
        entity_id: None,
        entity_name: Some(name.into()),
        details: None,
    }
}

#[tokio::test]
async fn append_and_list_newest_first() {
    let (db, org_id) = setup().await;
    let repo = SurrealActivityLogRepository::new(db);

    let appended = repo
        .append(entry(org_id, ActivityAction::RoleCreated, "Entrenador"))
        .await
        .unwrap();
    assert_eq!(appended.action, "role_created");
    assert_eq!(appended.entity_type, "role");
    assert_eq!(appended.organization_id, Some(org_id));

    repo.append(entry(org_id, ActivityAction::RoleUpdated, "Entrenador"))
        .await
        .unwrap();
    repo.append(entry(org_id, ActivityAction::RoleDeleted, "Entrenador"))
        .await
        .unwrap();

    let entries = repo.list(org_id, ActivityFilter::default()).await.unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries[0].created_at >= entries[1].created_at);
    assert!(entries[1].created_at >= entries[2].created_at);
}

#[tokio::test]
async fn list_respects_limit() {
    let (db, org_id) = setup().await;
    let repo = SurrealActivityLogRepository::new(db);

    for i in 0..5 {
        repo.append(entry(
            org_id,
            ActivityAction::AdminUpdated,
            &format!("admin-{i}"),
        ))
        .await
        .unwrap();
    }

    let entries = repo
        .list(
            org_id,
            ActivityFilter {
                limit: 2,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn list_respects_date_bounds() {
    let (db, org_id) = setup().await;
    let repo = SurrealActivityLogRepository::new(db);

    repo.append(entry(org_id, ActivityAction::SettingsUpdated, "Audit Gym"))
        .await
        .unwrap();

    let past = Utc::now() - Duration::hours(1);
    let future = Utc::now() + Duration::hours(1);

    let within = repo
        .list(
            org_id,
            ActivityFilter {
                from: Some(past),
                to: Some(future),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(within.len(), 1);

    let before = repo
        .list(
            org_id,
            ActivityFilter {
                to: Some(past),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(before.is_empty());

    let after = repo
        .list(
            org_id,
            ActivityFilter {
                from: Some(future),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(after.is_empty());
}

#[tokio::test]
async fn listing_is_tenant_scoped() {
    let (db, org_id) = setup().await;
    let repo = SurrealActivityLogRepository::new(db);

    repo.append(entry(org_id, ActivityAction::RoleCreated, "Solo"))
        .await
        .unwrap();

    let other = repo
        .list(Uuid::new_v4(), ActivityFilter::default())
        .await
        .unwrap();
    assert!(other.is_empty());
}
