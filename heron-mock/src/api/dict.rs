//! 数据字典接口

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
};
use chrono::Utc;
use serde::Deserialize;
use shared::models::{DictItem, DictItemUpsert, DictType, DictTypeUpsert};
use shared::{Envelope, Page};

use crate::api::{ok, ok_empty};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/type/list", get(list_types))
        .route("/type", post(create_type).put(update_type))
        .route("/type/{id}", delete(remove_type))
        .route("/item/list", get(list_items))
        .route("/item", post(create_item).put(update_item))
        .route("/item/{id}", delete(remove_item))
}

async fn list_types(State(state): State<AppState>) -> Json<Envelope<Page<DictType>>> {
    let data = state.data.read().await;
    let total = data.dict_types.len() as u64;
    ok(Page::new(data.dict_types.clone(), total))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemQuery {
    type_code: String,
}

/// 按类型码取字典项；未知类型码返回空列表而不是 404
async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> Json<Envelope<Vec<DictItem>>> {
    let data = state.data.read().await;
    let items: Vec<DictItem> = data
        .dict_items
        .iter()
        .filter(|item| item.dict_code == query.type_code)
        .cloned()
        .collect();
    ok(items)
}

async fn create_type(
    State(state): State<AppState>,
    Json(req): Json<DictTypeUpsert>,
) -> ApiResult<Json<Envelope<DictType>>> {
    let mut data = state.data.write().await;
    if data.dict_types.iter().any(|t| t.code == req.code) {
        return Err(ApiError::validation(format!("code '{}' already exists", req.code)));
    }
    let id = data.dict_types.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    let dict_type = DictType {
        id,
        name: req.name,
        code: req.code,
        status: req.status,
        description: req.description,
        create_time: Utc::now(),
    };
    data.dict_types.push(dict_type.clone());
    Ok(ok(dict_type))
}

async fn update_type(
    State(state): State<AppState>,
    Json(req): Json<DictTypeUpsert>,
) -> ApiResult<Json<Envelope<DictType>>> {
    let id = req
        .id
        .ok_or_else(|| ApiError::validation("id is required for update"))?;
    let mut data = state.data.write().await;
    let dict_type = data
        .dict_types
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| ApiError::not_found("Dict type not found"))?;

    dict_type.name = req.name;
    dict_type.code = req.code;
    dict_type.status = req.status;
    dict_type.description = req.description;
    Ok(ok(dict_type.clone()))
}

/// 删除类型并连带其所有字典项
async fn remove_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let mut data = state.data.write().await;
    let Some(index) = data.dict_types.iter().position(|t| t.id == id) else {
        return Err(ApiError::not_found("Dict type not found"));
    };
    let removed = data.dict_types.remove(index);
    data.dict_items.retain(|item| item.dict_code != removed.code);
    Ok(ok_empty("Delete successful"))
}

async fn create_item(
    State(state): State<AppState>,
    Json(req): Json<DictItemUpsert>,
) -> ApiResult<Json<Envelope<DictItem>>> {
    let mut data = state.data.write().await;
    if !data.dict_types.iter().any(|t| t.code == req.dict_code) {
        return Err(ApiError::validation(format!(
            "dict type '{}' does not exist",
            req.dict_code
        )));
    }
    let id = data.dict_items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
    let item = DictItem {
        id,
        dict_code: req.dict_code,
        label: req.label,
        value: req.value,
        sort: req.sort,
        status: req.status,
        tag_type: req.tag_type,
    };
    data.dict_items.push(item.clone());
    Ok(ok(item))
}

async fn update_item(
    State(state): State<AppState>,
    Json(req): Json<DictItemUpsert>,
) -> ApiResult<Json<Envelope<DictItem>>> {
    let id = req
        .id
        .ok_or_else(|| ApiError::validation("id is required for update"))?;
    let mut data = state.data.write().await;
    let item = data
        .dict_items
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| ApiError::not_found("Dict item not found"))?;

    item.dict_code = req.dict_code;
    item.label = req.label;
    item.value = req.value;
    item.sort = req.sort;
    item.status = req.status;
    item.tag_type = req.tag_type;
    Ok(ok(item.clone()))
}

async fn remove_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let mut data = state.data.write().await;
    let before = data.dict_items.len();
    data.dict_items.retain(|i| i.id != id);
    if data.dict_items.len() == before {
        return Err(ApiError::not_found("Dict item not found"));
    }
    Ok(ok_empty("Delete successful"))
}
