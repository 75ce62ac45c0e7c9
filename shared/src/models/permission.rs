//! Permission Model (RBAC 权限)
//!
//! 权限记录是一张扁平表，通过 `parent_id` 形成树边。两个派生视图：
//! - 完整权限树（管理页面用）
//! - 菜单树（仅 `menu` 类型，按用户权限集过滤后的导航结构）
//!
//! 树总是自顶向下从根构建，循环在构造上不可能出现。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Status;
use super::role::Role;

/// Permission kind: menus render navigation, buttons/apis gate actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKind {
    Menu,
    Button,
    Api,
}

/// Permission entity
///
/// `code` is the opaque capability string checked by the client
/// (e.g. `user:create`). `parent_id`, if present, must reference an
/// existing permission id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: PermissionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub sort: i32,
    pub status: Status,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// Create permission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCreate {
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: PermissionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort: i32,
    #[serde(default)]
    pub status: Status,
}

/// Update permission payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<PermissionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// A permission with its recursively attached children
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionTreeNode {
    #[serde(flatten)]
    pub permission: Permission,
    #[serde(default)]
    pub children: Vec<PermissionTreeNode>,
}

/// The `/permission/user` bundle: everything the client needs after login
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPermissions {
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub menus: Vec<PermissionTreeNode>,
}

// ============================================================================
// Tree construction
// ============================================================================

/// 从扁平权限列表构建完整权限树（所有类型）
///
/// 构建前按 `sort` 稳定排序一次，保证同级顺序确定，
/// 与后端返回顺序无关。
pub fn build_permission_tree(permissions: &[Permission]) -> Vec<PermissionTreeNode> {
    let mut sorted = permissions.to_vec();
    sorted.sort_by_key(|p| p.sort);
    attach_children(&sorted, None)
}

/// 从扁平权限列表构建菜单树（仅 `menu` 类型）
///
/// button/api 类型的节点整体排除：既不作为节点也不作为挂载点。
pub fn build_menu_tree(permissions: &[Permission]) -> Vec<PermissionTreeNode> {
    let mut menus: Vec<Permission> = permissions
        .iter()
        .filter(|p| p.kind == PermissionKind::Menu)
        .cloned()
        .collect();
    menus.sort_by_key(|p| p.sort);
    attach_children(&menus, None)
}

fn attach_children(records: &[Permission], parent: Option<i64>) -> Vec<PermissionTreeNode> {
    records
        .iter()
        .filter(|p| p.parent_id == parent)
        .map(|p| PermissionTreeNode {
            permission: p.clone(),
            children: attach_children(records, Some(p.id)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(id: i64, parent_id: Option<i64>, kind: PermissionKind, sort: i32) -> Permission {
        Permission {
            id,
            name: format!("perm-{id}"),
            code: format!("perm:{id}"),
            kind,
            parent_id,
            path: None,
            icon: None,
            sort,
            status: Status::Active,
            create_time: Utc::now(),
            update_time: Utc::now(),
        }
    }

    #[test]
    fn menu_tree_excludes_button_nodes() {
        let perms = vec![
            perm(1, None, PermissionKind::Menu, 1),
            perm(2, Some(1), PermissionKind::Menu, 1),
            perm(3, Some(1), PermissionKind::Button, 2),
        ];

        let tree = build_menu_tree(&perms);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].permission.id, 1);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].permission.id, 2);
        assert!(tree[0].children[0].children.is_empty());
    }

    #[test]
    fn full_tree_keeps_button_nodes() {
        let perms = vec![
            perm(1, None, PermissionKind::Menu, 1),
            perm(3, Some(1), PermissionKind::Button, 2),
        ];

        let tree = build_permission_tree(&perms);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].permission.kind, PermissionKind::Button);
    }

    #[test]
    fn siblings_are_ordered_by_sort_key() {
        // Input deliberately shuffled
        let perms = vec![
            perm(10, None, PermissionKind::Menu, 5),
            perm(11, None, PermissionKind::Menu, 1),
            perm(12, None, PermissionKind::Menu, 3),
        ];

        let tree = build_menu_tree(&perms);
        let ids: Vec<i64> = tree.iter().map(|n| n.permission.id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
    }

    #[test]
    fn tree_construction_is_idempotent() {
        let perms = vec![
            perm(1, None, PermissionKind::Menu, 2),
            perm(2, Some(1), PermissionKind::Menu, 1),
            perm(3, None, PermissionKind::Menu, 1),
            perm(4, Some(3), PermissionKind::Button, 1),
        ];

        let a = build_permission_tree(&perms);
        let b = build_permission_tree(&perms);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn orphan_parent_reference_yields_no_node() {
        // parent 99 does not exist; the node is unreachable from any root
        let perms = vec![
            perm(1, None, PermissionKind::Menu, 1),
            perm(2, Some(99), PermissionKind::Menu, 1),
        ];

        let tree = build_menu_tree(&perms);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn permission_kind_serializes_as_type_field() {
        let p = perm(1, None, PermissionKind::Button, 1);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "button");
        assert_eq!(json["code"], "perm:1");
    }
}
