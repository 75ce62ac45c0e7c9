//! Permission store
//!
//! Holds the authenticated user's RBAC state (roles, permission codes,
//! derived menu tree) plus the catalog-wide lists used by the admin
//! pages. Capability checks are exact string matches against the
//! user's permission codes, no wildcard semantics.

use tracing::warn;

use shared::models::{Permission, PermissionTreeNode, Role, UserPermissions};

use crate::http::HttpClient;
use crate::ClientResult;

/// 权限状态管理
#[derive(Debug, Default)]
pub struct PermissionStore {
    // 当前用户的权限信息
    user_permissions: Vec<Permission>,
    user_roles: Vec<Role>,
    user_menus: Vec<PermissionTreeNode>,

    // 全量目录（管理页面用）
    all_permissions: Vec<Permission>,
    permission_tree: Vec<PermissionTreeNode>,
    all_roles: Vec<Role>,
}

impl PermissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Capability checks ==========

    /// 检查是否拥有指定权限码
    pub fn has_permission(&self, code: &str) -> bool {
        self.user_permissions.iter().any(|p| p.code == code)
    }

    /// 任意一个权限码命中即可（空集为 false）
    pub fn has_any_permission<I, S>(&self, codes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes.into_iter().any(|c| self.has_permission(c.as_ref()))
    }

    /// 所有权限码都命中才通过（空集为 true）
    pub fn has_all_permissions<I, S>(&self, codes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes.into_iter().all(|c| self.has_permission(c.as_ref()))
    }

    /// 检查是否拥有指定角色码
    pub fn has_role(&self, code: &str) -> bool {
        self.user_roles.iter().any(|r| r.code == code)
    }

    // ========== State accessors ==========

    /// Whether the user's menu tree has been populated
    pub fn menus_loaded(&self) -> bool {
        !self.user_menus.is_empty()
    }

    pub fn user_menus(&self) -> &[PermissionTreeNode] {
        &self.user_menus
    }

    pub fn user_roles(&self) -> &[Role] {
        &self.user_roles
    }

    pub fn user_permissions(&self) -> &[Permission] {
        &self.user_permissions
    }

    pub fn all_permissions(&self) -> &[Permission] {
        &self.all_permissions
    }

    pub fn permission_tree(&self) -> &[PermissionTreeNode] {
        &self.permission_tree
    }

    pub fn all_roles(&self) -> &[Role] {
        &self.all_roles
    }

    // ========== Loading ==========

    /// 初始化权限数据
    ///
    /// Four fetches run concurrently. Catalog fetches (permission list,
    /// permission tree, role list) fail soft: the failure is logged and
    /// that slice stays empty. The user bundle is the one load the
    /// route guard depends on, so its failure fails the whole call.
    pub async fn init_permissions(&mut self, http: &HttpClient) -> ClientResult<()> {
        let bundle = http.get::<UserPermissions>("/permission/user");
        let list = http.get::<Vec<Permission>>("/permission/list");
        let tree = http.get::<Vec<PermissionTreeNode>>("/permission/tree");
        let roles = http.get::<Vec<Role>>("/role/list");

        let (bundle, list, tree, roles) = tokio::join!(bundle, list, tree, roles);

        self.all_permissions = list.unwrap_or_else(|e| {
            warn!("permission list fetch failed: {e}");
            Vec::new()
        });
        self.permission_tree = tree.unwrap_or_else(|e| {
            warn!("permission tree fetch failed: {e}");
            Vec::new()
        });
        self.all_roles = roles.unwrap_or_else(|e| {
            warn!("role list fetch failed: {e}");
            Vec::new()
        });

        match bundle {
            Ok(bundle) => {
                self.user_roles = bundle.roles;
                self.user_permissions = bundle.permissions;
                self.user_menus = bundle.menus;
                Ok(())
            }
            Err(e) => {
                warn!("user permission fetch failed: {e}");
                Err(e)
            }
        }
    }

    /// 仅刷新当前用户的权限信息
    pub async fn fetch_user_permissions(&mut self, http: &HttpClient) -> ClientResult<()> {
        let bundle = http.get::<UserPermissions>("/permission/user").await?;
        self.user_roles = bundle.roles;
        self.user_permissions = bundle.permissions;
        self.user_menus = bundle.menus;
        Ok(())
    }

    /// 清除当前用户的权限信息（不动全量目录）
    pub fn clear_permissions(&mut self) {
        self.user_permissions.clear();
        self.user_roles.clear();
        self.user_menus.clear();
    }
}

// test-only seeding, the real path goes through init_permissions
#[cfg(test)]
impl PermissionStore {
    pub(crate) fn seed_user(
        &mut self,
        roles: Vec<Role>,
        permissions: Vec<Permission>,
        menus: Vec<PermissionTreeNode>,
    ) {
        self.user_roles = roles;
        self.user_permissions = permissions;
        self.user_menus = menus;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use shared::models::{PermissionKind, Status};

    use super::*;

    fn perm(code: &str) -> Permission {
        Permission {
            id: 1,
            name: code.to_string(),
            code: code.to_string(),
            kind: PermissionKind::Button,
            parent_id: None,
            path: None,
            icon: None,
            sort: 0,
            status: Status::Active,
            create_time: Utc::now(),
            update_time: Utc::now(),
        }
    }

    fn role(code: &str) -> Role {
        Role {
            id: 1,
            name: code.to_string(),
            code: code.to_string(),
            description: None,
            status: Status::Active,
            permissions: Vec::new(),
            create_time: Utc::now(),
            update_time: Utc::now(),
        }
    }

    #[test]
    fn permission_check_is_exact_match() {
        let mut store = PermissionStore::new();
        store.seed_user(Vec::new(), vec![perm("user:create"), perm("user:view")], Vec::new());

        assert!(store.has_permission("user:create"));
        assert!(!store.has_permission("user:delete"));
        // no wildcard or prefix semantics
        assert!(!store.has_permission("user"));
        assert!(!store.has_permission("user:"));
    }

    #[test]
    fn vacuous_combinators() {
        let mut store = PermissionStore::new();
        store.seed_user(Vec::new(), vec![perm("user:view")], Vec::new());

        assert!(store.has_all_permissions(Vec::<&str>::new()));
        assert!(!store.has_any_permission(Vec::<&str>::new()));
    }

    #[test]
    fn combinators_over_the_same_predicate() {
        let mut store = PermissionStore::new();
        store.seed_user(Vec::new(), vec![perm("user:view"), perm("user:create")], Vec::new());

        assert!(store.has_any_permission(["user:delete", "user:view"]));
        assert!(!store.has_any_permission(["user:delete", "role:view"]));
        assert!(store.has_all_permissions(["user:view", "user:create"]));
        assert!(!store.has_all_permissions(["user:view", "user:delete"]));
    }

    #[test]
    fn role_check_and_clear() {
        let mut store = PermissionStore::new();
        store.seed_user(vec![role("admin")], vec![perm("user:view")], Vec::new());

        assert!(store.has_role("admin"));
        assert!(!store.has_role("super_admin"));

        store.clear_permissions();
        assert!(!store.has_role("admin"));
        assert!(!store.has_permission("user:view"));
        assert!(!store.menus_loaded());
    }
}
