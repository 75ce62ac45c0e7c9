//! 文件管理接口

use axum::{
    Json, Router,
    extract::{Multipart, Query, State},
    routing::{delete, get, post},
};
use chrono::Utc;
use serde::Deserialize;
use shared::Envelope;
use shared::models::FileRecord;
use uuid::Uuid;

use crate::api::ok;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list))
        .route("/upload", post(upload))
        .route("/delete", delete(remove))
}

async fn list(State(state): State<AppState>) -> Json<Envelope<Vec<FileRecord>>> {
    let data = state.data.read().await;
    ok(data.files.clone())
}

/// 接收 multipart 上传；内容不落盘，只登记元数据
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Envelope<FileRecord>>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("invalid multipart body: {e}")))?
        .ok_or_else(|| ApiError::validation("missing file field"))?;

    let name = field
        .file_name()
        .unwrap_or("uploaded-file")
        .to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::validation(format!("failed to read upload: {e}")))?;

    let record = FileRecord {
        id: Uuid::new_v4().to_string(),
        url: format!("https://files.example.com/{name}"),
        name,
        content_type,
        size: bytes.len() as u64,
        create_time: Utc::now(),
    };

    let mut data = state.data.write().await;
    data.files.push(record.clone());
    Ok(ok(record))
}

#[derive(Debug, Deserialize)]
struct DeleteQuery {
    id: String,
}

/// 返回是否真正删除了记录
async fn remove(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Json<Envelope<bool>> {
    let mut data = state.data.write().await;
    let before = data.files.len();
    data.files.retain(|f| f.id != query.id);
    ok(data.files.len() < before)
}
