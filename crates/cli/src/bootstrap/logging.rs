use jenkin_domain::config::LogFormat;
use jenkin_domain::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins over the configured level when it parses.
pub fn init_logging(config: &Config) {
    let base_level = config.logging.level.as_str();
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) => {
            EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(base_level))
        }
        Err(_) => EnvFilter::try_new(format!("{},sqlx=warn", base_level))
            .unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init(),
    }
}
