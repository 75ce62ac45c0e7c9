//! Role Model (RBAC 角色)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Status;
use super::permission::Permission;

/// Role entity
///
/// The granted permission set is denormalized: full permission records are
/// embedded rather than referenced by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl Role {
    /// Permission codes granted by this role
    pub fn permission_codes(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(|p| p.code.as_str())
    }
}

/// Create role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCreate {
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub permission_ids: Vec<i64>,
}

/// Update role payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_ids: Option<Vec<i64>>,
}

/// User/role many-to-many edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub user_id: i64,
    pub role_id: i64,
}

/// `POST /user/{id}/roles` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRolesRequest {
    pub role_ids: Vec<i64>,
}

/// `POST /role/{id}/permissions` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPermissionsRequest {
    pub permission_ids: Vec<i64>,
}
