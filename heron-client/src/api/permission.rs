//! 权限管理接口

use shared::models::{
    Permission, PermissionCreate, PermissionTreeNode, PermissionUpdate, UserPermissions,
};

use crate::ClientResult;
use crate::http::HttpClient;

impl HttpClient {
    /// 获取权限列表（扁平）
    pub async fn list_permissions(&self) -> ClientResult<Vec<Permission>> {
        self.get("/permission/list").await
    }

    /// 获取完整权限树
    pub async fn permission_tree(&self) -> ClientResult<Vec<PermissionTreeNode>> {
        self.get("/permission/tree").await
    }

    /// 获取当前用户的权限信息
    pub async fn user_permissions(&self) -> ClientResult<UserPermissions> {
        self.get("/permission/user").await
    }

    /// 创建权限
    pub async fn create_permission(&self, permission: &PermissionCreate) -> ClientResult<Permission> {
        self.post("/permission/create", permission).await
    }

    /// 更新权限
    pub async fn update_permission(
        &self,
        id: i64,
        update: &PermissionUpdate,
    ) -> ClientResult<Permission> {
        self.put(&format!("/permission/update/{id}"), update).await
    }

    /// 删除权限
    pub async fn delete_permission(&self, id: i64) -> ClientResult<()> {
        self.delete_unit(&format!("/permission/delete/{id}")).await
    }
}
