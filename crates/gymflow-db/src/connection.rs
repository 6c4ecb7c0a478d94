//! SurrealDB connection management.
//!
//! Row-level authorization is declared on the tables themselves (see
//! [`crate::schema`]); a root-authenticated connection bypasses those
//! PERMISSIONS clauses and therefore serves as the *elevated* handle
//! required by cross-tenant bootstrap operations. Caller-scoped access
//! runs through record-user sessions that the PERMISSIONS apply to.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

/// Configuration for connecting to SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket URL (e.g., `127.0.0.1:8000`).
    pub url: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
    /// Root username for the elevated connection.
    pub username: String,
    /// Root password for the elevated connection.
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "gymflow".into(),
            database: "main".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

impl DbConfig {
    /// Build a config from `GYMFLOW_DB_*` environment variables,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str, fallback: String| std::env::var(name).unwrap_or(fallback);
        Self {
            url: var("GYMFLOW_DB_URL", defaults.url),
            namespace: var("GYMFLOW_DB_NAMESPACE", defaults.namespace),
            database: var("GYMFLOW_DB_DATABASE", defaults.database),
            username: var("GYMFLOW_DB_USERNAME", defaults.username),
            password: var("GYMFLOW_DB_PASSWORD", defaults.password),
        }
    }
}

/// Manages the elevated connection to SurrealDB.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Connect to SurrealDB using the provided configuration.
    ///
    /// Authenticates as root, selects the configured namespace and
    /// database, and returns a ready-to-use manager.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to SurrealDB"
        );

        let db = Surreal::new::<Ws>(&config.url).await?;

        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;

        db.use_ns(&config.namespace).use_db(&config.database).await?;

        Ok(Self { db })
    }

    /// The underlying elevated client handle.
    pub fn db(&self) -> Surreal<Client> {
        self.db.clone()
    }
}
