//! Gymflow Server — database bootstrap entry point.
//!
//! Connects to SurrealDB with the elevated credentials and brings the
//! schema up to date. Request handling lives in the host application;
//! this binary owns initialization.

use gymflow_db::{DbConfig, DbManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("gymflow=info".parse()?),
        )
        .json()
        .init();

    tracing::info!("Starting Gymflow bootstrap...");

    let config = DbConfig::from_env();
    let manager = DbManager::connect(&config).await?;
    gymflow_db::run_migrations(&manager.db()).await?;

    tracing::info!("Schema is up to date.");

    Ok(())
}
