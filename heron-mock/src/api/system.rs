//! 系统与仪表盘接口

use axum::{Json, Router, extract::State, routing::get};
use shared::Envelope;
use shared::models::{DashboardData, Menu, Transaction};

use crate::api::ok;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/system/menus", get(menus))
        .route("/api/dashboard/data", get(dashboard))
        .route("/api/transactions/realtime", get(transactions))
}

/// 静态兜底菜单，不做 RBAC 过滤
async fn menus() -> Json<Envelope<Vec<Menu>>> {
    let leaf = |id, name: &str, path: &str, icon: &str| Menu {
        id,
        name: name.to_string(),
        path: path.to_string(),
        icon: Some(icon.to_string()),
        children: Vec::new(),
    };
    ok(vec![
        leaf(1, "route.dashboard", "/dashboard", "Odometer"),
        Menu {
            id: 2,
            name: "route.system".to_string(),
            path: "/system".to_string(),
            icon: Some("Setting".to_string()),
            children: vec![
                leaf(21, "route.userList", "/system/user", "User"),
                leaf(22, "route.roleManagement", "/system/role", "UserFilled"),
                leaf(28, "route.department", "/system/department", "OfficeBuilding"),
                leaf(30, "route.fileDemo", "/system/file", "Files"),
                leaf(23, "route.profile", "/system/profile", "User"),
            ],
        },
    ])
}

async fn dashboard(State(state): State<AppState>) -> Json<Envelope<DashboardData>> {
    let data = state.data.read().await;
    ok(data.dashboard.clone())
}

async fn transactions(State(state): State<AppState>) -> Json<Envelope<Vec<Transaction>>> {
    let data = state.data.read().await;
    ok(data.transactions.clone())
}
