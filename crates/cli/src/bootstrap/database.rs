use jenkin_domain::config::DatabaseConfig;
use jenkin_infrastructure::database::{create_pool, run_migrations};
use sqlx::SqlitePool;
use tracing::{error, info};

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    info!(url = %cfg.url, "Initializing database");

    let pool = create_pool(cfg).map_err(|e| {
        error!(error = %e, "Failed to create database pool");
        anyhow::anyhow!(e)
    })?;

    run_migrations(&pool, &cfg.migrations_path)
        .await
        .map_err(|e| {
            error!(error = %e, path = %cfg.migrations_path, "Failed to apply migrations");
            anyhow::anyhow!(e)
        })?;

    info!(
        max_connections = cfg.max_connections,
        "Database initialized successfully"
    );

    Ok(pool)
}
