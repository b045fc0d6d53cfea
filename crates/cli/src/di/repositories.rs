use jenkin_infrastructure::repositories::SqliteLogStore;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub log_store: Arc<SqliteLogStore>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            log_store: Arc::new(SqliteLogStore::new(pool)),
        }
    }
}
