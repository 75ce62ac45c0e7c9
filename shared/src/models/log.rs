//! Audit log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the audited operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Success,
    Fail,
}

/// One audit log row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: i64,
    pub username: String,
    pub module: String,
    pub action: String,
    pub ip: String,
    pub status: LogStatus,
    pub create_time: DateTime<Utc>,
    pub details: String,
}

/// Payload for recording an operation (`POST /log/create`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogCreate {
    pub module: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LogStatus>,
}

/// `GET /log/list` query: 1-based page plus optional filters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LogStatus>,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            username: None,
            module: None,
            status: None,
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}
