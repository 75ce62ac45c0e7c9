//! Dictionary Model (数据字典)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Status;

/// Dictionary type (e.g. `userStatus`, `gender`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictType {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub create_time: DateTime<Utc>,
}

/// One entry of a dictionary type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictItem {
    pub id: i64,
    /// Owning dictionary type code
    pub dict_code: String,
    pub label: String,
    pub value: String,
    pub sort: i32,
    pub status: Status,
    /// Display hint for the rendering layer (e.g. `success`, `danger`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_type: Option<String>,
}

/// Payload for creating or replacing a dictionary type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictTypeUpsert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for creating or replacing a dictionary item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictItemUpsert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub dict_code: String,
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_type: Option<String>,
}
