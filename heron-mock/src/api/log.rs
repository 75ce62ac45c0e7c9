//! 操作日志接口

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use chrono::Utc;
use shared::models::{AuditLog, LogCreate, LogQuery, LogStatus};
use shared::{Envelope, Page};

use crate::api::{ok, ok_empty};
use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list))
        .route("/create", post(create))
}

/// 过滤后分页；username 为子串匹配，module/status 为精确匹配
async fn list(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Json<Envelope<Page<AuditLog>>> {
    let data = state.data.read().await;

    let filtered: Vec<&AuditLog> = data
        .logs
        .iter()
        .filter(|log| {
            query
                .username
                .as_ref()
                .is_none_or(|u| log.username.to_lowercase().contains(&u.to_lowercase()))
        })
        .filter(|log| query.module.as_ref().is_none_or(|m| log.module == *m))
        .filter(|log| query.status.is_none_or(|s| log.status == s))
        .collect();

    let total = filtered.len() as u64;
    let page = query.page.max(1) as usize;
    let page_size = query.page_size.max(1) as usize;
    let list: Vec<AuditLog> = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    ok(Page::new(list, total))
}

async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<LogCreate>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let mut data = state.data.write().await;
    let id = data.logs.iter().map(|l| l.id).max().unwrap_or(0) + 1;
    let log = AuditLog {
        id,
        username: current.username,
        module: req.module,
        action: req.action,
        ip: "127.0.0.1".to_string(),
        status: req.status.unwrap_or(LogStatus::Success),
        create_time: Utc::now(),
        details: req.details.unwrap_or_default(),
    };
    data.logs.insert(0, log);
    Ok(ok_empty("Log recorded"))
}
