use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestLoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Only requests under this path segment are logged.
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,

    /// Bodies are truncated to this many bytes in the log record.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Bodies larger than this, or of unknown length, are streamed through
    /// without being buffered or logged.
    #[serde(default = "default_max_buffer_bytes")]
    pub max_buffer_bytes: usize,
}

impl Default for RequestLoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path_prefix: default_path_prefix(),
            max_body_bytes: default_max_body_bytes(),
            max_buffer_bytes: default_max_buffer_bytes(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_path_prefix() -> String {
    "/api".to_string()
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_max_buffer_bytes() -> usize {
    2 * 1024 * 1024
}
