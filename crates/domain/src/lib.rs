//! Jenkin Domain Layer
pub mod config;
pub mod content_type;
pub mod errors;
pub mod log_retention;

pub use config::{CliOverrides, Config, ConfigError};
pub use content_type::{ContentTypeError, ContentTypeGroup, ContentTypeValidator};
pub use errors::DomainError;
pub use log_retention::{
    format_timestamp, BatchOutcome, BatchStage, PruneError, PruneReport, RetentionCutoff,
    RetentionSettings, TIMESTAMP_FORMAT,
};
