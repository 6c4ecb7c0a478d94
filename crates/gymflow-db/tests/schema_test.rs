//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    gymflow_db::run_migrations(&db).await.unwrap();

    // Verify that all tables exist by querying INFO FOR DB.
    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(
        info_str.contains("organization"),
        "missing organization table"
    );
    assert!(info_str.contains("role"), "missing role table");
    assert!(
        info_str.contains("organization_member"),
        "missing organization_member table"
    );
    assert!(info_str.contains("admin"), "missing admin table");
    assert!(
        info_str.contains("activity_log"),
        "missing activity_log table"
    );
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    gymflow_db::run_migrations(&db).await.unwrap();
    // A second run sees the recorded version and applies nothing.
    gymflow_db::run_migrations(&db).await.unwrap();
}
