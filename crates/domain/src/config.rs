pub mod database;
pub mod errors;
pub mod logging;
pub mod request_logging;
pub mod retention;
pub mod root;
pub mod server;

pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use request_logging::RequestLoggingConfig;
pub use retention::RetentionConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
