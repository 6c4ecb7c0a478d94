//! SurrealDB implementation of [`ActivityLogRepository`].

use chrono::{DateTime, Utc};
use gymflow_core::error::GymflowResult;
use gymflow_core::models::activity::{ActivityEntry, CreateActivityEntry};
use gymflow_core::repository::{ActivityFilter, ActivityLogRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ActivityRow {
    record_id: String,
    organization_id: Option<String>,
    actor_id: String,
    actor_name: String,
    action: String,
    entity_type: String,
    entity_id: Option<String>,
    entity_name: Option<String>,
    details: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl ActivityRow {
    fn try_into_entry(self) -> Result<ActivityEntry, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let organization_id = self
            .organization_id
            .map(|s| {
                Uuid::parse_str(&s)
                    .map_err(|e| DbError::Decode(format!("invalid organization UUID: {e}")))
            })
            .transpose()?;
        let actor_id = Uuid::parse_str(&self.actor_id)
            .map_err(|e| DbError::Decode(format!("invalid actor UUID: {e}")))?;
        Ok(ActivityEntry {
            id,
            organization_id,
            actor_id,
            actor_name: self.actor_name,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            entity_name: self.entity_name,
            details: self.details,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the append-only activity log.
#[derive(Clone)]
pub struct SurrealActivityLogRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealActivityLogRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ActivityLogRepository for SurrealActivityLogRepository<C> {
    async fn append(&self, input: CreateActivityEntry) -> GymflowResult<ActivityEntry> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let details = input
            .details
            .unwrap_or(serde_json::Value::Object(Default::default()));

        let result = self
            .db
            .query(
                "CREATE type::record('activity_log', $id) SET \
                 organization_id = $organization_id, \
                 actor_id = $actor_id, actor_name = $actor_name, \
                 action = $action, entity_type = $entity_type, \
                 entity_id = $entity_id, entity_name = $entity_name, \
                 details = $details \
                 RETURN meta::id(id) AS record_id, *",
            )
            .bind(("id", id_str.clone()))
            .bind(("organization_id", input.organization_id.map(|o| o.to_string())))
            .bind(("actor_id", input.actor_id.to_string()))
            .bind(("actor_name", input.actor_name))
            .bind(("action", input.action.as_str()))
            .bind(("entity_type", input.entity_type.as_str()))
            .bind(("entity_id", input.entity_id))
            .bind(("entity_name", input.entity_name))
            .bind(("details", details))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<ActivityRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "activity_log".into(),
            id: id_str,
        })?;

        Ok(row.try_into_entry()?)
    }

    async fn list(
        &self,
        organization_id: Uuid,
        filter: ActivityFilter,
    ) -> GymflowResult<Vec<ActivityEntry>> {
        let mut clauses = vec!["organization_id = $organization_id"];
        if filter.from.is_some() {
            clauses.push("created_at >= $from");
        }
        if filter.to.is_some() {
            clauses.push("created_at < $to");
        }

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM activity_log \
             WHERE {} \
             ORDER BY created_at DESC LIMIT $limit",
            clauses.join(" AND ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("organization_id", organization_id.to_string()))
            .bind(("limit", filter.limit));

        if let Some(from) = filter.from {
            builder = builder.bind(("from", from));
        }
        if let Some(to) = filter.to {
            builder = builder.bind(("to", to));
        }

        let mut result = builder.await.map_err(DbError::from)?;

        let rows: Vec<ActivityRow> = result.take(0).map_err(DbError::from)?;

        let entries = rows
            .into_iter()
            .map(|row| row.try_into_entry())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(entries)
    }
}
