pub mod cleanup_old_logs;

pub use cleanup_old_logs::CleanupOldLogsUseCase;
