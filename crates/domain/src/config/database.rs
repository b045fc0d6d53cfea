use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection descriptor for the log store, e.g. `sqlite:./jenkin.db`.
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds SQLite waits on a locked database before failing a statement.
    /// Writers appending log rows compete with the retention batches, so
    /// this should comfortably exceed the duration of a single batch.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            migrations_path: default_migrations_path(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite:./jenkin.db".to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_busy_timeout_secs() -> u64 {
    30
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

fn default_migrations_path() -> String {
    "./migrations".to_string()
}
