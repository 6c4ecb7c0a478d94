//! SurrealDB implementation of [`AdminRepository`].

use chrono::{DateTime, Utc};
use gymflow_core::error::GymflowResult;
use gymflow_core::models::admin::{AdminRecord, AdminStatus, CreateAdminRecord, UpdateAdminRecord};
use gymflow_core::repository::AdminRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct AdminRow {
    organization_id: String,
    auth_user_id: String,
    name: String,
    email: String,
    role_id: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRow {
    fn try_into_admin(self, id: Uuid) -> Result<AdminRecord, DbError> {
        let organization_id = Uuid::parse_str(&self.organization_id)
            .map_err(|e| DbError::Decode(format!("invalid organization UUID: {e}")))?;
        let auth_user_id = Uuid::parse_str(&self.auth_user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        let role_id = Uuid::parse_str(&self.role_id)
            .map_err(|e| DbError::Decode(format!("invalid role UUID: {e}")))?;
        let status = AdminStatus::parse(&self.status)
            .ok_or_else(|| DbError::Decode(format!("invalid admin status: {}", self.status)))?;
        Ok(AdminRecord {
            id,
            organization_id,
            auth_user_id,
            name: self.name,
            email: self.email,
            role_id,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct AdminRowWithId {
    record_id: String,
    organization_id: String,
    auth_user_id: String,
    name: String,
    email: String,
    role_id: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRowWithId {
    fn try_into_admin(self) -> Result<AdminRecord, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        AdminRow {
            organization_id: self.organization_id,
            auth_user_id: self.auth_user_id,
            name: self.name,
            email: self.email,
            role_id: self.role_id,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .try_into_admin(id)
    }
}

/// SurrealDB implementation of the Admin repository.
#[derive(Clone)]
pub struct SurrealAdminRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAdminRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AdminRepository for SurrealAdminRepository<C> {
    async fn create(&self, input: CreateAdminRecord) -> GymflowResult<AdminRecord> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('admin', $id) SET \
                 organization_id = $organization_id, \
                 auth_user_id = $auth_user_id, \
                 name = $name, email = $email, \
                 role_id = $role_id, status = $status",
            )
            .bind(("id", id_str.clone()))
            .bind(("organization_id", input.organization_id.to_string()))
            .bind(("auth_user_id", input.auth_user_id.to_string()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("role_id", input.role_id.to_string()))
            .bind(("status", input.status.as_str()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<AdminRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "admin".into(),
            id: id_str,
        })?;

        Ok(row.try_into_admin(id)?)
    }

    async fn get_by_id(&self, organization_id: Uuid, id: Uuid) -> GymflowResult<AdminRecord> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('admin', $id) \
                 WHERE organization_id = $organization_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("organization_id", organization_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "admin".into(),
            id: id_str,
        })?;

        Ok(row.try_into_admin(id)?)
    }

    async fn get_by_user(
        &self,
        organization_id: Uuid,
        auth_user_id: Uuid,
    ) -> GymflowResult<AdminRecord> {
        let user_id_str = auth_user_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM admin \
                 WHERE organization_id = $organization_id \
                 AND auth_user_id = $auth_user_id",
            )
            .bind(("organization_id", organization_id.to_string()))
            .bind(("auth_user_id", user_id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "admin".into(),
            id: format!("auth_user_id={user_id_str}"),
        })?;

        Ok(row.try_into_admin()?)
    }

    async fn update(
        &self,
        organization_id: Uuid,
        id: Uuid,
        input: UpdateAdminRecord,
    ) -> GymflowResult<AdminRecord> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.role_id.is_some() {
            sets.push("role_id = $role_id");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('admin', $id) SET {} \
             WHERE organization_id = $organization_id",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("organization_id", organization_id.to_string()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(role_id) = input.role_id {
            builder = builder.bind(("role_id", role_id.to_string()));
        }
        if let Some(status) = input.status {
            builder = builder.bind(("status", status.as_str()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<AdminRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "admin".into(),
            id: id_str,
        })?;

        Ok(row.try_into_admin(id)?)
    }

    async fn delete(&self, organization_id: Uuid, id: Uuid) -> GymflowResult<()> {
        self.db
            .query(
                "DELETE type::record('admin', $id) \
                 WHERE organization_id = $organization_id",
            )
            .bind(("id", id.to_string()))
            .bind(("organization_id", organization_id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self, organization_id: Uuid) -> GymflowResult<Vec<AdminRecord>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM admin \
                 WHERE organization_id = $organization_id \
                 ORDER BY created_at DESC",
            )
            .bind(("organization_id", organization_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminRowWithId> = result.take(0).map_err(DbError::from)?;

        let admins = rows
            .into_iter()
            .map(|row| row.try_into_admin())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(admins)
    }
}
