use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jenkin_application::ports::{Clock, LogBatchTransaction, LogStore, LogStoreConnection};
use jenkin_domain::{DomainError, RetentionCutoff};
use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct MockRow {
    id: i64,
    timestamp: DateTime<Utc>,
}

#[derive(Default)]
struct StoreState {
    rows: Vec<MockRow>,
    next_id: i64,
    fail_open: bool,
    fail_delete_on_batch: Option<u64>,
    fail_commit_on_batch: Option<u64>,
    insert_after_commit: Option<(u64, Vec<DateTime<Utc>>)>,
    opens: u64,
    closes: u64,
    begins: u64,
    commits: u64,
    rollbacks: u64,
    failed_commits: u64,
    committed_batches: Vec<u64>,
    commit_instants: Vec<Instant>,
}

/// In-memory log table with transactional batches and failure injection.
#[derive(Clone, Default)]
pub struct MockLogStore {
    state: Arc<Mutex<StoreState>>,
}

impl MockLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, timestamp: DateTime<Utc>) {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.rows.push(MockRow { id, timestamp });
    }

    pub fn insert_many(&self, timestamp: DateTime<Utc>, count: usize) {
        for _ in 0..count {
            self.insert(timestamp);
        }
    }

    pub fn set_fail_open(&self, fail: bool) {
        self.state.lock().unwrap().fail_open = fail;
    }

    pub fn fail_delete_on_batch(&self, batch: u64) {
        self.state.lock().unwrap().fail_delete_on_batch = Some(batch);
    }

    pub fn fail_commit_on_batch(&self, batch: u64) {
        self.state.lock().unwrap().fail_commit_on_batch = Some(batch);
    }

    /// Simulates a concurrent writer appending rows right after `batch` commits.
    pub fn insert_after_commit(&self, batch: u64, timestamps: Vec<DateTime<Utc>>) {
        self.state.lock().unwrap().insert_after_commit = Some((batch, timestamps));
    }

    pub fn count(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }

    pub fn count_older_than(&self, ts: DateTime<Utc>) -> usize {
        self.state
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|r| r.timestamp < ts)
            .count()
    }

    pub fn opens(&self) -> u64 {
        self.state.lock().unwrap().opens
    }

    pub fn closes(&self) -> u64 {
        self.state.lock().unwrap().closes
    }

    pub fn begins(&self) -> u64 {
        self.state.lock().unwrap().begins
    }

    pub fn commits(&self) -> u64 {
        self.state.lock().unwrap().commits
    }

    pub fn rollbacks(&self) -> u64 {
        self.state.lock().unwrap().rollbacks
    }

    pub fn failed_commits(&self) -> u64 {
        self.state.lock().unwrap().failed_commits
    }

    pub fn committed_batches(&self) -> Vec<u64> {
        self.state.lock().unwrap().committed_batches.clone()
    }

    pub fn commit_instants(&self) -> Vec<Instant> {
        self.state.lock().unwrap().commit_instants.clone()
    }
}

#[async_trait]
impl LogStore for MockLogStore {
    async fn open(&self) -> Result<Box<dyn LogStoreConnection>, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_open {
            return Err(DomainError::ConnectionError(
                "log store unreachable".to_string(),
            ));
        }
        state.opens += 1;
        Ok(Box::new(MockConnection {
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockConnection {
    state: Arc<Mutex<StoreState>>,
}

#[async_trait]
impl LogStoreConnection for MockConnection {
    async fn begin<'a>(&'a mut self) -> Result<Box<dyn LogBatchTransaction + 'a>, DomainError> {
        let mut state = self.state.lock().unwrap();
        state.begins += 1;
        Ok(Box::new(MockTransaction {
            state: Arc::clone(&self.state),
            batch: state.begins,
            pending: HashSet::new(),
        }))
    }

    async fn close(self: Box<Self>) {
        self.state.lock().unwrap().closes += 1;
    }
}

struct MockTransaction {
    state: Arc<Mutex<StoreState>>,
    batch: u64,
    pending: HashSet<i64>,
}

#[async_trait]
impl LogBatchTransaction for MockTransaction {
    async fn delete_older_than(
        &mut self,
        cutoff: &RetentionCutoff,
        limit: u32,
    ) -> Result<u64, DomainError> {
        let state = self.state.lock().unwrap();
        if state.fail_delete_on_batch == Some(self.batch) {
            return Err(DomainError::DatabaseError("delete failed".to_string()));
        }
        self.pending = state
            .rows
            .iter()
            .filter(|r| cutoff.is_expired(r.timestamp))
            .take(limit as usize)
            .map(|r| r.id)
            .collect();
        Ok(self.pending.len() as u64)
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_commit_on_batch == Some(self.batch) {
            state.failed_commits += 1;
            return Err(DomainError::TransactionError("commit failed".to_string()));
        }

        state.rows.retain(|r| !self.pending.contains(&r.id));
        state.commits += 1;
        state.committed_batches.push(self.pending.len() as u64);
        state.commit_instants.push(Instant::now());

        if let Some((batch, timestamps)) = state.insert_after_commit.take() {
            if batch == self.batch {
                for timestamp in timestamps {
                    state.next_id += 1;
                    let id = state.next_id;
                    state.rows.push(MockRow { id, timestamp });
                }
            } else {
                state.insert_after_commit = Some((batch, timestamps));
            }
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        self.state.lock().unwrap().rollbacks += 1;
        Ok(())
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Collects formatted tracing output for assertions.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
