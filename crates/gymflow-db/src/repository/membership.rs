//! SurrealDB implementation of [`MembershipRepository`].

use chrono::{DateTime, Utc};
use gymflow_core::error::GymflowResult;
use gymflow_core::models::membership::{CreateMembership, Membership};
use gymflow_core::repository::MembershipRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct MembershipRow {
    organization_id: String,
    user_id: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MembershipRow {
    fn try_into_membership(self, id: Uuid) -> Result<Membership, DbError> {
        let organization_id = Uuid::parse_str(&self.organization_id)
            .map_err(|e| DbError::Decode(format!("invalid organization UUID: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        Ok(Membership {
            id,
            organization_id,
            user_id,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct MembershipRowWithId {
    record_id: String,
    organization_id: String,
    user_id: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MembershipRowWithId {
    fn try_into_membership(self) -> Result<Membership, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let organization_id = Uuid::parse_str(&self.organization_id)
            .map_err(|e| DbError::Decode(format!("invalid organization UUID: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        Ok(Membership {
            id,
            organization_id,
            user_id,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Membership repository.
#[derive(Clone)]
pub struct SurrealMembershipRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealMembershipRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> MembershipRepository for SurrealMembershipRepository<C> {
    async fn create(&self, input: CreateMembership) -> GymflowResult<Membership> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('organization_member', $id) SET \
                 organization_id = $organization_id, \
                 user_id = $user_id, role = $role",
            )
            .bind(("id", id_str.clone()))
            .bind(("organization_id", input.organization_id.to_string()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("role", input.role))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<MembershipRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization_member".into(),
            id: id_str,
        })?;

        Ok(row.try_into_membership(id)?)
    }

    async fn get_by_user(&self, user_id: Uuid) -> GymflowResult<Membership> {
        let user_id_str = user_id.to_string();

        // First match by creation time: the one-organization-per-user
        // assumption, made deterministic.
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM organization_member WHERE user_id = $user_id \
                 ORDER BY created_at ASC LIMIT 1",
            )
            .bind(("user_id", user_id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MembershipRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization_member".into(),
            id: format!("user_id={user_id_str}"),
        })?;

        Ok(row.try_into_membership()?)
    }

    async fn get(&self, organization_id: Uuid, user_id: Uuid) -> GymflowResult<Membership> {
        let user_id_str = user_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM organization_member \
                 WHERE organization_id = $organization_id \
                 AND user_id = $user_id",
            )
            .bind(("organization_id", organization_id.to_string()))
            .bind(("user_id", user_id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MembershipRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization_member".into(),
            id: format!("user_id={user_id_str}"),
        })?;

        Ok(row.try_into_membership()?)
    }

    async fn set_role(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
        role: &str,
    ) -> GymflowResult<Membership> {
        let user_id_str = user_id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE organization_member SET \
                 role = $role, updated_at = time::now() \
                 WHERE organization_id = $organization_id \
                 AND user_id = $user_id \
                 RETURN meta::id(id) AS record_id, *",
            )
            .bind(("organization_id", organization_id.to_string()))
            .bind(("user_id", user_id_str.clone()))
            .bind(("role", role.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MembershipRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization_member".into(),
            id: format!("user_id={user_id_str}"),
        })?;

        Ok(row.try_into_membership()?)
    }

    async fn delete(&self, organization_id: Uuid, user_id: Uuid) -> GymflowResult<()> {
        self.db
            .query(
                "DELETE organization_member \
                 WHERE organization_id = $organization_id \
                 AND user_id = $user_id",
            )
            .bind(("organization_id", organization_id.to_string()))
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
