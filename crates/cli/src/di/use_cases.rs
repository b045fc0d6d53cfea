use super::Repositories;
use jenkin_application::use_cases::CleanupOldLogsUseCase;
use jenkin_domain::{Config, RetentionSettings};
use std::sync::Arc;

pub struct UseCases {
    pub cleanup_logs: Arc<CleanupOldLogsUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, config: &Config) -> anyhow::Result<Self> {
        let settings = RetentionSettings::from_config(&config.retention)?;
        Ok(Self {
            cleanup_logs: Arc::new(CleanupOldLogsUseCase::new(
                repos.log_store.clone(),
                settings,
            )),
        })
    }
}
