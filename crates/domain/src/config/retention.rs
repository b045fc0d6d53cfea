use serde::{Deserialize, Serialize};

/// Retention policy for the append-only `logs` table.
///
/// ```toml
/// [retention]
/// enabled = true
/// retention_days = 90
/// batch_size = 10000
/// batch_delay_ms = 100
/// interval_secs = 86400
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetentionConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Rows strictly older than `now - retention_days` are deleted.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Maximum rows deleted per transaction.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,

    /// Pause between non-empty batches.
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            retention_days: default_retention_days(),
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_retention_days() -> u32 {
    90
}

fn default_batch_size() -> u32 {
    10_000
}

fn default_batch_delay_ms() -> u64 {
    100
}

fn default_interval_secs() -> u64 {
    86_400
}
