use clap::Parser;
use jenkin_api::AppState;
use jenkin_domain::CliOverrides;
use jenkin_jobs::{JobRunner, LogRetentionJob};
use std::net::SocketAddr;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "jenkin")]
#[command(version)]
#[command(about = "Jenkin API - log store with scheduled retention")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Web server port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database URL (e.g. sqlite:./jenkin.db)
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Days of logs to keep
    #[arg(long)]
    retention_days: Option<u32>,

    /// Run one retention pass and exit
    #[arg(long)]
    prune_once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        web_port: cli.web_port,
        bind_address: cli.bind.clone(),
        database_url: cli.database.clone(),
        log_level: cli.log_level.clone(),
        retention_days: cli.retention_days,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting Jenkin API v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(pool);
    let use_cases = di::UseCases::new(&repos, &config)?;

    if cli.prune_once {
        return Ok(match use_cases.cleanup_logs.execute().await {
            Ok(report) => {
                info!(
                    deleted = report.total_deleted,
                    batches = report.transactions(),
                    "One-off log retention run finished"
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "One-off log retention run failed");
                ExitCode::FAILURE
            }
        });
    }

    let shutdown = CancellationToken::new();

    let mut runner = JobRunner::new().with_shutdown_token(shutdown.clone());
    if config.retention.enabled {
        runner = runner.with_log_retention(
            LogRetentionJob::new(use_cases.cleanup_logs.clone())
                .with_interval(config.retention.interval_secs),
        );
    } else {
        info!("Log retention job disabled");
    }
    runner.start().await;

    let app_state = AppState::new(use_cases.cleanup_logs, config.request_logging.clone())
        .with_shutdown_token(shutdown.clone());

    let web_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.web_port)
        .parse()?;

    server::start_web_server(web_addr, app_state, shutdown).await?;

    info!("Server shutdown complete");
    Ok(ExitCode::SUCCESS)
}
