use crate::ports::{Clock, LogStore, LogStoreConnection, SystemClock};
use jenkin_domain::{
    BatchOutcome, BatchStage, PruneError, PruneReport, RetentionCutoff, RetentionSettings,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Deletes expired rows from the log table in small, paced transactions.
///
/// A run opens one connection, fixes its cutoff, then repeats
/// begin/delete/commit until a batch removes nothing. The first failed batch
/// is rolled back and ends the run; batches committed before it stay deleted.
/// At most one run executes at a time per use case instance.
pub struct CleanupOldLogsUseCase {
    store: Arc<dyn LogStore>,
    clock: Arc<dyn Clock>,
    settings: RetentionSettings,
    run_lock: Mutex<()>,
}

impl CleanupOldLogsUseCase {
    pub fn new(store: Arc<dyn LogStore>, settings: RetentionSettings) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            settings,
            run_lock: Mutex::new(()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &RetentionSettings {
        &self.settings
    }

    pub async fn execute(&self) -> Result<PruneReport, PruneError> {
        self.execute_with(&self.settings, &CancellationToken::new())
            .await
    }

    /// Runs once with explicit settings. `shutdown` is checked at every pause
    /// between batches.
    pub async fn execute_with(
        &self,
        settings: &RetentionSettings,
        shutdown: &CancellationToken,
    ) -> Result<PruneReport, PruneError> {
        let Ok(_running) = self.run_lock.try_lock() else {
            warn!("Log retention run skipped, previous run still in progress");
            return Err(PruneError::AlreadyRunning);
        };

        info!(
            retention_days = settings.retention_days(),
            batch_size = settings.batch_size(),
            "Log retention run started"
        );

        let mut conn = self.store.open().await.map_err(|e| {
            error!(error = %e, "Log retention failed to open log store");
            PruneError::Connection(e)
        })?;

        let cutoff = RetentionCutoff::from_now(self.clock.now(), settings.retention_days());
        debug!(cutoff = %cutoff, "Log retention cutoff computed");

        let result = prune_batches(conn.as_mut(), cutoff, settings, shutdown).await;
        conn.close().await;

        let report = result?;
        info!(
            cutoff = %report.cutoff,
            deleted = report.total_deleted,
            batches = report.transactions(),
            "Log retention run completed"
        );
        Ok(report)
    }
}

async fn prune_batches(
    conn: &mut dyn LogStoreConnection,
    cutoff: RetentionCutoff,
    settings: &RetentionSettings,
    shutdown: &CancellationToken,
) -> Result<PruneReport, PruneError> {
    let mut batches = Vec::new();
    let mut total_deleted: u64 = 0;

    loop {
        let batch = batches.len() as u64 + 1;

        match delete_batch(conn, &cutoff, settings.batch_size()).await {
            BatchOutcome::Deleted(deleted) => {
                total_deleted += deleted;
                batches.push(deleted);
                debug!(batch, deleted, "Log retention batch committed");
                if deleted == 0 {
                    break;
                }
            }
            BatchOutcome::Failed { stage, cause } => {
                error!(
                    batch,
                    stage = %stage,
                    committed = total_deleted,
                    error = %cause,
                    "Log retention batch failed, transaction rolled back"
                );
                return Err(PruneError::BatchDelete {
                    batch,
                    stage,
                    deleted: total_deleted,
                    cause,
                });
            }
        }

        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                warn!(deleted = total_deleted, "Log retention run cancelled");
                return Err(PruneError::Cancelled { deleted: total_deleted });
            }
            _ = tokio::time::sleep(settings.batch_delay()) => {}
        }
    }

    Ok(PruneReport {
        cutoff,
        total_deleted,
        batches,
    })
}

async fn delete_batch(
    conn: &mut dyn LogStoreConnection,
    cutoff: &RetentionCutoff,
    limit: u32,
) -> BatchOutcome {
    let mut tx = match conn.begin().await {
        Ok(tx) => tx,
        Err(cause) => {
            return BatchOutcome::Failed {
                stage: BatchStage::Begin,
                cause,
            }
        }
    };

    let deleted = match tx.delete_older_than(cutoff, limit).await {
        Ok(deleted) => deleted,
        Err(cause) => {
            if let Err(e) = tx.rollback().await {
                warn!(error = %e, "Log retention rollback failed");
            }
            return BatchOutcome::Failed {
                stage: BatchStage::Delete,
                cause,
            };
        }
    };

    match tx.commit().await {
        Ok(()) => BatchOutcome::Deleted(deleted),
        Err(cause) => BatchOutcome::Failed {
            stage: BatchStage::Commit,
            cause,
        },
    }
}
