//! File listing model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uploaded file record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub content_type: String,
    /// Size in bytes
    pub size: u64,
    pub create_time: DateTime<Utc>,
}
