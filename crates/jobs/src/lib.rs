pub mod log_retention;
pub mod runner;

pub use log_retention::LogRetentionJob;
pub use runner::JobRunner;
