//! Static menu model for `/system/menus`
//!
//! Distinct from the permission-derived menu tree: this is the fallback
//! navigation the server exposes without RBAC filtering.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Menu>,
}
