pub mod response;
pub mod retention;

pub use response::ApiResponse;
pub use retention::{RetentionReportDto, RunRetentionRequest};
