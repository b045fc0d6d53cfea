use crate::config::RetentionConfig;
use crate::errors::DomainError;
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Storage format of the `logs.timestamp` column. Fixed width, so textual
/// ordering is chronological ordering.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionSettings {
    retention_days: u32,
    batch_size: u32,
    batch_delay: Duration,
}

impl RetentionSettings {
    pub const DEFAULT_RETENTION_DAYS: u32 = 90;
    pub const DEFAULT_BATCH_SIZE: u32 = 10_000;
    pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);

    pub fn new(
        retention_days: u32,
        batch_size: u32,
        batch_delay: Duration,
    ) -> Result<Self, PruneError> {
        if batch_size == 0 {
            return Err(PruneError::InvalidSettings(
                "batch size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            retention_days,
            batch_size,
            batch_delay,
        })
    }

    pub fn from_config(config: &RetentionConfig) -> Result<Self, PruneError> {
        Self::new(
            config.retention_days,
            config.batch_size,
            Duration::from_millis(config.batch_delay_ms),
        )
    }

    /// Copy of these settings with per-run overrides applied.
    pub fn with_overrides(
        &self,
        retention_days: Option<u32>,
        batch_size: Option<u32>,
    ) -> Result<Self, PruneError> {
        Self::new(
            retention_days.unwrap_or(self.retention_days),
            batch_size.unwrap_or(self.batch_size),
            self.batch_delay,
        )
    }

    pub fn retention_days(&self) -> u32 {
        self.retention_days
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    pub fn batch_delay(&self) -> Duration {
        self.batch_delay
    }
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self {
            retention_days: Self::DEFAULT_RETENTION_DAYS,
            batch_size: Self::DEFAULT_BATCH_SIZE,
            batch_delay: Self::DEFAULT_BATCH_DELAY,
        }
    }
}

/// Absolute timestamp below which log rows are expired. Computed once per
/// run and never moved while the run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RetentionCutoff(DateTime<Utc>);

impl RetentionCutoff {
    pub fn from_now(now: DateTime<Utc>, retention_days: u32) -> Self {
        let window = TimeDelta::days(i64::from(retention_days));
        Self(
            now.checked_sub_signed(window)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        )
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn to_db_string(&self) -> String {
        format_timestamp(self.0)
    }

    /// Strict: a row stamped exactly at the cutoff is kept.
    pub fn is_expired(&self, ts: DateTime<Utc>) -> bool {
        ts < self.0
    }
}

impl fmt::Display for RetentionCutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStage {
    Begin,
    Delete,
    Commit,
}

impl fmt::Display for BatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BatchStage::Begin => "begin",
            BatchStage::Delete => "delete",
            BatchStage::Commit => "commit",
        };
        f.write_str(s)
    }
}

/// Result of a single delete transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    Deleted(u64),
    Failed {
        stage: BatchStage,
        cause: DomainError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneReport {
    pub cutoff: RetentionCutoff,
    pub total_deleted: u64,
    /// Rows deleted by each committed batch, terminal zero batch included.
    pub batches: Vec<u64>,
}

impl PruneReport {
    pub fn transactions(&self) -> usize {
        self.batches.len()
    }

    pub fn has_deletions(&self) -> bool {
        self.total_deleted > 0
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PruneError {
    #[error("Log store unavailable: {0}")]
    Connection(DomainError),

    #[error("Batch {batch} failed at {stage} ({deleted} rows committed before failure): {cause}")]
    BatchDelete {
        batch: u64,
        stage: BatchStage,
        deleted: u64,
        cause: DomainError,
    },

    #[error("A retention run is already in progress")]
    AlreadyRunning,

    #[error("Retention run cancelled after deleting {deleted} rows")]
    Cancelled { deleted: u64 },

    #[error("Invalid retention settings: {0}")]
    InvalidSettings(String),
}
