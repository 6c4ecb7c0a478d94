//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.
//!
//! Tables carry PERMISSIONS clauses that bind caller-scoped record
//! sessions to their own tenant's rows; root connections bypass them,
//! which is how the elevated client performs cross-tenant bootstrap
//! writes (organization and membership inserts during provisioning,
//! organization lookup by email during repair, rollback deletes).

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Organizations (global scope)
-- =======================================================================
DEFINE TABLE organization SCHEMAFULL
    PERMISSIONS
        FOR select WHERE id IN (\
            SELECT VALUE organization_id FROM organization_member \
            WHERE user_id = $auth.id)
        FOR update WHERE id IN (\
            SELECT VALUE organization_id FROM organization_member \
            WHERE user_id = $auth.id)
        FOR create, delete NONE;
DEFINE FIELD name ON TABLE organization TYPE string;
DEFINE FIELD slug ON TABLE organization TYPE string;
DEFINE FIELD email ON TABLE organization TYPE string;
DEFINE FIELD phone ON TABLE organization TYPE option<string>;
DEFINE FIELD address ON TABLE organization TYPE option<string>;
DEFINE FIELD created_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_organization_slug ON TABLE organization \
    COLUMNS slug UNIQUE;

-- =======================================================================
-- Roles (organization scope)
-- =======================================================================
DEFINE TABLE role SCHEMAFULL
    PERMISSIONS
        FOR select, create, update, delete WHERE organization_id IN (\
            SELECT VALUE organization_id FROM organization_member \
            WHERE user_id = $auth.id);
DEFINE FIELD organization_id ON TABLE role TYPE string;
DEFINE FIELD name ON TABLE role TYPE string;
DEFINE FIELD description ON TABLE role TYPE string;
DEFINE FIELD permissions ON TABLE role TYPE array DEFAULT [];
DEFINE FIELD permissions.* ON TABLE role TYPE string;
DEFINE FIELD created_at ON TABLE role TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE role TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_role_org_name ON TABLE role \
    COLUMNS organization_id, name UNIQUE;

-- =======================================================================
-- Organization members (one row per (organization, user) pair)
-- =======================================================================
DEFINE TABLE organization_member SCHEMAFULL
    PERMISSIONS
        FOR select WHERE user_id = $auth.id
        FOR create, update, delete NONE;
DEFINE FIELD organization_id ON TABLE organization_member TYPE string;
DEFINE FIELD user_id ON TABLE organization_member TYPE string;
DEFINE FIELD role ON TABLE organization_member TYPE string;
DEFINE FIELD created_at ON TABLE organization_member TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE organization_member TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_member_org_user ON TABLE organization_member \
    COLUMNS organization_id, user_id UNIQUE;
DEFINE INDEX idx_member_user ON TABLE organization_member \
    COLUMNS user_id;

-- =======================================================================
-- Admin records (UI-facing directory, organization scope)
-- =======================================================================
DEFINE TABLE admin SCHEMAFULL
    PERMISSIONS
        FOR select, create, update, delete WHERE organization_id IN (\
            SELECT VALUE organization_id FROM organization_member \
            WHERE user_id = $auth.id);
DEFINE FIELD organization_id ON TABLE admin TYPE string;
DEFINE FIELD auth_user_id ON TABLE admin TYPE string;
DEFINE FIELD name ON TABLE admin TYPE string;
DEFINE FIELD email ON TABLE admin TYPE string;
DEFINE FIELD role_id ON TABLE admin TYPE string;
DEFINE FIELD status ON TABLE admin TYPE string \
    ASSERT $value IN ['active', 'inactive'];
DEFINE FIELD created_at ON TABLE admin TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE admin TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_admin_org_user ON TABLE admin \
    COLUMNS organization_id, auth_user_id UNIQUE;

-- =======================================================================
-- Activity Log (organization scope, append-only)
-- =======================================================================
DEFINE TABLE activity_log SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select WHERE organization_id IN (\
            SELECT VALUE organization_id FROM organization_member \
            WHERE user_id = $auth.id)
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD organization_id ON TABLE activity_log TYPE option<string>;
DEFINE FIELD actor_id ON TABLE activity_log TYPE string;
DEFINE FIELD actor_name ON TABLE activity_log TYPE string;
DEFINE FIELD action ON TABLE activity_log TYPE string;
DEFINE FIELD entity_type ON TABLE activity_log TYPE string;
DEFINE FIELD entity_id ON TABLE activity_log TYPE option<string>;
DEFINE FIELD entity_name ON TABLE activity_log TYPE option<string>;
DEFINE FIELD details ON TABLE activity_log TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD created_at ON TABLE activity_log TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_activity_org_time ON TABLE activity_log \
    COLUMNS organization_id, created_at;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}
