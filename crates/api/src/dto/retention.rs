use jenkin_domain::PruneReport;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct RunRetentionRequest {
    pub retention_days: Option<u32>,
    #[validate(range(
        min = 1,
        max = 1_000_000,
        message = "batch_size must be between 1 and 1000000"
    ))]
    pub batch_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RetentionReportDto {
    pub cutoff: String,
    pub total_deleted: u64,
    pub batches: Vec<u64>,
}

impl From<PruneReport> for RetentionReportDto {
    fn from(report: PruneReport) -> Self {
        Self {
            cutoff: report.cutoff.to_string(),
            total_deleted: report.total_deleted,
            batches: report.batches,
        }
    }
}
