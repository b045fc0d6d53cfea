use jenkin_domain::config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Builds the log store pool. Connections are opened lazily, so an
/// unreachable store surfaces when a run acquires its connection.
pub fn create_pool(cfg: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&cfg.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(cfg.busy_timeout_secs));

    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .connect_lazy_with(options);

    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool, migrations_path: &str) -> Result<(), sqlx::Error> {
    let migrator = Migrator::new(Path::new(migrations_path)).await?;
    migrator.run(pool).await?;
    info!(path = migrations_path, "Database migrations applied");
    Ok(())
}
