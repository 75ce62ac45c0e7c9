//! 用户管理接口

use shared::models::{AssignRolesRequest, Role, UserCreate, UserRecord, UserUpdate};

use crate::ClientResult;
use crate::http::HttpClient;

impl HttpClient {
    /// 获取用户列表（含角色与直接权限）
    pub async fn list_users(&self) -> ClientResult<Vec<UserRecord>> {
        self.get("/user/list").await
    }

    /// 创建用户
    pub async fn create_user(&self, user: &UserCreate) -> ClientResult<UserRecord> {
        self.post("/user/create", user).await
    }

    /// 更新用户
    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> ClientResult<UserRecord> {
        self.put(&format!("/user/update/{id}"), update).await
    }

    /// 删除用户（同时清理角色/权限关联）
    pub async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.delete_unit(&format!("/user/delete/{id}")).await
    }

    /// 批量导入用户，默认分配普通用户角色
    pub async fn batch_create_users(&self, users: &[UserCreate]) -> ClientResult<Vec<UserRecord>> {
        self.post("/user/batch-create", &users).await
    }

    /// 获取用户的角色
    pub async fn user_roles(&self, user_id: i64) -> ClientResult<Vec<Role>> {
        self.get(&format!("/user/{user_id}/roles")).await
    }

    /// 为用户分配角色（整体替换）
    pub async fn assign_user_roles(&self, user_id: i64, role_ids: Vec<i64>) -> ClientResult<()> {
        let body = AssignRolesRequest { role_ids };
        self.post_unit(&format!("/user/{user_id}/roles"), &body).await
    }

    /// 移除用户的某个角色
    pub async fn remove_user_role(&self, user_id: i64, role_id: i64) -> ClientResult<()> {
        self.delete_unit(&format!("/user/{user_id}/roles/{role_id}")).await
    }
}
