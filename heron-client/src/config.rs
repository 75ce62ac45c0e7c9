//! Client configuration

use std::path::PathBuf;

/// Client configuration for connecting to the admin API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory for durable client state (the persisted token).
    /// `None` disables persistence entirely.
    pub storage_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 10,
            storage_dir: None,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Enable token persistence under the given directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080/api")
    }
}
