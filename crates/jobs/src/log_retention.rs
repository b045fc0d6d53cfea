use jenkin_application::use_cases::CleanupOldLogsUseCase;
use jenkin_domain::PruneError;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const DEFAULT_INTERVAL_SECS: u64 = 86_400;

/// Background job that periodically prunes expired rows from the log table.
pub struct LogRetentionJob {
    cleanup: Arc<CleanupOldLogsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl LogRetentionJob {
    pub fn new(cleanup: Arc<CleanupOldLogsUseCase>) -> Self {
        Self {
            cleanup,
            interval_secs: DEFAULT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            retention_days = self.cleanup.settings().retention_days(),
            batch_size = self.cleanup.settings().batch_size(),
            interval_secs = self.interval_secs,
            "Starting log retention job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            // a late tick runs once, missed ticks are not replayed
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("LogRetentionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.run_once().await;
                    }
                }
            }
        });
    }

    async fn run_once(&self) {
        match self
            .cleanup
            .execute_with(self.cleanup.settings(), &self.shutdown)
            .await
        {
            Ok(report) => {
                info!(
                    deleted = report.total_deleted,
                    cutoff = %report.cutoff,
                    "Log retention cleanup completed"
                );
            }
            Err(PruneError::AlreadyRunning) => {
                warn!("Log retention cleanup skipped, a run is already in progress");
            }
            Err(PruneError::Cancelled { deleted }) => {
                info!(deleted, "Log retention cleanup interrupted by shutdown");
            }
            Err(e) => {
                error!(error = %e, "Log retention cleanup failed");
            }
        }
    }
}
