//! API 路由模块
//!
//! 各区域一个子模块，统一挂在 `/api` 前缀下。

pub mod auth;
pub mod department;
pub mod dict;
pub mod file;
pub mod log;
pub mod notice;
pub mod permission;
pub mod role;
pub mod system;
pub mod user;

use axum::{Json, Router};
use shared::Envelope;

use crate::state::AppState;

/// Assemble the full API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/auth", auth::routes())
        .nest("/api/user", user::routes())
        .nest("/api/role", role::routes())
        .nest("/api/permission", permission::routes())
        .nest("/api/department", department::routes())
        .nest("/api/dict", dict::routes())
        .nest("/api/file", file::routes())
        .nest("/api/log", log::routes())
        .nest("/api/notice", notice::routes())
        .merge(system::routes())
        .with_state(state)
}

/// 成功响应
pub(crate) fn ok<T>(data: T) -> Json<Envelope<T>> {
    Json(Envelope::ok(data))
}

/// 成功响应（自定义消息）
pub(crate) fn ok_message<T>(data: T, message: &str) -> Json<Envelope<T>> {
    Json(Envelope::ok_with_message(data, message))
}

/// 无数据的成功响应，`data` 序列化为 null
pub(crate) fn ok_empty(message: &str) -> Json<Envelope<serde_json::Value>> {
    Json(Envelope::ok_with_message(serde_json::Value::Null, message))
}
