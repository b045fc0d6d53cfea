pub mod logs;

// Re-export use cases
pub use logs::CleanupOldLogsUseCase;
