//! 系统与仪表盘接口

use shared::models::{DashboardData, Menu, Transaction};

use crate::ClientResult;
use crate::http::HttpClient;

impl HttpClient {
    /// 获取静态菜单（未经 RBAC 过滤的兜底导航）
    pub async fn system_menus(&self) -> ClientResult<Vec<Menu>> {
        self.get("/system/menus").await
    }

    /// 获取仪表盘聚合指标
    pub async fn dashboard_data(&self) -> ClientResult<DashboardData> {
        self.get("/dashboard/data").await
    }

    /// 获取实时交易流
    pub async fn realtime_transactions(&self) -> ClientResult<Vec<Transaction>> {
        self.get("/transactions/realtime").await
    }
}
