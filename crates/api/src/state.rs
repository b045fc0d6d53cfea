use jenkin_application::use_cases::CleanupOldLogsUseCase;
use jenkin_domain::config::RequestLoggingConfig;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct AppState {
    pub cleanup: Arc<CleanupOldLogsUseCase>,
    pub request_logging: Arc<RequestLoggingConfig>,
    /// Cancelled on shutdown; manual retention runs stop at their next pause.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(cleanup: Arc<CleanupOldLogsUseCase>, request_logging: RequestLoggingConfig) -> Self {
        Self {
            cleanup,
            request_logging: Arc::new(request_logging),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }
}
