//! 部门管理接口

use shared::models::{Department, DepartmentCreate, DepartmentUpdate};

use crate::ClientResult;
use crate::http::HttpClient;

impl HttpClient {
    /// 获取部门树（children 内联）
    pub async fn list_departments(&self) -> ClientResult<Vec<Department>> {
        self.get("/department/list").await
    }

    /// 创建部门
    pub async fn create_department(&self, dept: &DepartmentCreate) -> ClientResult<Department> {
        self.post("/department/create", dept).await
    }

    /// 更新部门
    pub async fn update_department(&self, update: &DepartmentUpdate) -> ClientResult<Department> {
        self.put("/department/update", update).await
    }

    /// 删除部门
    pub async fn delete_department(&self, id: i64) -> ClientResult<()> {
        self.delete_unit(&format!("/department/{id}")).await
    }
}
