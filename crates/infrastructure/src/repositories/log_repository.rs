use async_trait::async_trait;
use jenkin_application::ports::{LogBatchTransaction, LogStore, LogStoreConnection};
use jenkin_domain::{DomainError, RetentionCutoff};
use sqlx::pool::PoolConnection;
use sqlx::{Connection, Sqlite, SqlitePool, Transaction};
use tracing::debug;

const DELETE_EXPIRED_BATCH: &str =
    "DELETE FROM logs WHERE id IN (SELECT id FROM logs WHERE timestamp < ? LIMIT ?)";

pub struct SqliteLogStore {
    pool: SqlitePool,
}

impl SqliteLogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogStore for SqliteLogStore {
    async fn open(&self) -> Result<Box<dyn LogStoreConnection>, DomainError> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| DomainError::ConnectionError(e.to_string()))?;
        Ok(Box::new(SqliteLogConnection { conn }))
    }
}

struct SqliteLogConnection {
    conn: PoolConnection<Sqlite>,
}

#[async_trait]
impl LogStoreConnection for SqliteLogConnection {
    async fn begin<'a>(&'a mut self) -> Result<Box<dyn LogBatchTransaction + 'a>, DomainError> {
        let tx = Connection::begin(&mut *self.conn)
            .await
            .map_err(|e| DomainError::TransactionError(format!("Failed to begin: {}", e)))?;
        Ok(Box::new(SqliteLogTransaction { tx }))
    }

    async fn close(self: Box<Self>) {
        // back to the pool
        drop(self.conn);
        debug!("Log store connection released");
    }
}

struct SqliteLogTransaction<'a> {
    tx: Transaction<'a, Sqlite>,
}

#[async_trait]
impl<'a> LogBatchTransaction for SqliteLogTransaction<'a> {
    async fn delete_older_than(
        &mut self,
        cutoff: &RetentionCutoff,
        limit: u32,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(DELETE_EXPIRED_BATCH)
            .bind(cutoff.to_db_string())
            .bind(i64::from(limit))
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                DomainError::DatabaseError(format!("Failed to delete expired logs: {}", e))
            })?;
        Ok(result.rows_affected())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        // a failed COMMIT leaves the transaction open; dropping it rolls back
        self.tx
            .commit()
            .await
            .map_err(|e| DomainError::TransactionError(format!("Failed to commit: {}", e)))
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DomainError::TransactionError(format!("Failed to roll back: {}", e)))
    }
}
