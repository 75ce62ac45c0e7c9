//! 角色管理接口

use shared::models::{AssignPermissionsRequest, Permission, Role, RoleCreate, RoleUpdate};

use crate::ClientResult;
use crate::http::HttpClient;

impl HttpClient {
    /// 获取所有角色
    pub async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        self.get("/role/list").await
    }

    /// 获取角色详情（含权限）
    pub async fn role_detail(&self, id: i64) -> ClientResult<Role> {
        self.get(&format!("/role/detail/{id}")).await
    }

    /// 创建角色
    pub async fn create_role(&self, role: &RoleCreate) -> ClientResult<Role> {
        self.post("/role/create", role).await
    }

    /// 更新角色
    pub async fn update_role(&self, id: i64, update: &RoleUpdate) -> ClientResult<Role> {
        self.put(&format!("/role/update/{id}"), update).await
    }

    /// 删除角色
    pub async fn delete_role(&self, id: i64) -> ClientResult<()> {
        self.delete_unit(&format!("/role/delete/{id}")).await
    }

    /// 获取角色的权限
    pub async fn role_permissions(&self, role_id: i64) -> ClientResult<Vec<Permission>> {
        self.get(&format!("/role/{role_id}/permissions")).await
    }

    /// 为角色分配权限（整体替换）
    pub async fn assign_role_permissions(
        &self,
        role_id: i64,
        permission_ids: Vec<i64>,
    ) -> ClientResult<()> {
        let body = AssignPermissionsRequest { permission_ids };
        self.post_unit(&format!("/role/{role_id}/permissions"), &body).await
    }
}
