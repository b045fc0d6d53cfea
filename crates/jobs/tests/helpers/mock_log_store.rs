use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use jenkin_application::ports::{LogBatchTransaction, LogStore, LogStoreConnection};
use jenkin_domain::{DomainError, RetentionCutoff};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Log table kept as a list of timestamps.
#[derive(Clone)]
pub struct MockLogStore {
    rows: Arc<RwLock<Vec<DateTime<Utc>>>>,
    open_attempts: Arc<AtomicU64>,
    should_fail: Arc<AtomicBool>,
}

impl MockLogStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
            open_attempts: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn add_recent_log(&self) {
        self.rows.write().await.push(Utc::now());
    }

    pub async fn add_old_log(&self, days_ago: i64) {
        self.rows
            .write()
            .await
            .push(Utc::now() - TimeDelta::days(days_ago));
    }

    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }

    pub fn open_attempts(&self) -> u64 {
        self.open_attempts.load(Ordering::Relaxed)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl LogStore for MockLogStore {
    async fn open(&self) -> Result<Box<dyn LogStoreConnection>, DomainError> {
        self.open_attempts.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::ConnectionError("refused".to_string()));
        }
        Ok(Box::new(MockConnection {
            rows: Arc::clone(&self.rows),
        }))
    }
}

struct MockConnection {
    rows: Arc<RwLock<Vec<DateTime<Utc>>>>,
}

#[async_trait]
impl LogStoreConnection for MockConnection {
    async fn begin<'a>(&'a mut self) -> Result<Box<dyn LogBatchTransaction + 'a>, DomainError> {
        Ok(Box::new(MockTransaction {
            rows: Arc::clone(&self.rows),
            staged: None,
        }))
    }

    async fn close(self: Box<Self>) {}
}

struct MockTransaction {
    rows: Arc<RwLock<Vec<DateTime<Utc>>>>,
    staged: Option<Vec<DateTime<Utc>>>,
}

#[async_trait]
impl LogBatchTransaction for MockTransaction {
    async fn delete_older_than(
        &mut self,
        cutoff: &RetentionCutoff,
        limit: u32,
    ) -> Result<u64, DomainError> {
        let rows = self.rows.read().await;
        let mut remaining = Vec::with_capacity(rows.len());
        let mut deleted = 0u64;
        for ts in rows.iter() {
            if deleted < u64::from(limit) && cutoff.is_expired(*ts) {
                deleted += 1;
            } else {
                remaining.push(*ts);
            }
        }
        self.staged = Some(remaining);
        Ok(deleted)
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        if let Some(remaining) = self.staged {
            *self.rows.write().await = remaining;
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        Ok(())
    }
}
