//! 部门管理接口
//!
//! 部门在状态里以树形保存，增删改都要先在树里定位节点。

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use chrono::Utc;
use shared::Envelope;
use shared::models::{Department, DepartmentCreate, DepartmentUpdate};

use crate::api::{ok, ok_empty};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list))
        .route("/create", post(create))
        .route("/update", put(update))
        .route("/{id}", delete(remove))
}

async fn list(State(state): State<AppState>) -> Json<Envelope<Vec<Department>>> {
    let data = state.data.read().await;
    ok(data.departments.clone())
}

fn find_mut<'a>(nodes: &'a mut [Department], id: i64) -> Option<&'a mut Department> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

fn max_id(nodes: &[Department]) -> i64 {
    nodes
        .iter()
        .map(|n| n.id.max(max_id(&n.children)))
        .max()
        .unwrap_or(0)
}

fn remove_node(nodes: &mut Vec<Department>, id: i64) -> bool {
    if let Some(index) = nodes.iter().position(|n| n.id == id) {
        nodes.remove(index);
        return true;
    }
    nodes.iter_mut().any(|n| remove_node(&mut n.children, id))
}

async fn create(
    State(state): State<AppState>,
    Json(req): Json<DepartmentCreate>,
) -> ApiResult<Json<Envelope<Department>>> {
    let mut data = state.data.write().await;

    let department = Department {
        id: max_id(&data.departments) + 1,
        parent_id: req.parent_id,
        name: req.name,
        code: req.code,
        sort: req.sort,
        status: req.status,
        leader: req.leader,
        phone: req.phone,
        email: req.email,
        create_time: Utc::now(),
        children: Vec::new(),
    };

    match req.parent_id {
        Some(parent_id) => {
            let parent = find_mut(&mut data.departments, parent_id)
                .ok_or_else(|| ApiError::validation(format!("parent {parent_id} does not exist")))?;
            parent.children.push(department.clone());
        }
        None => data.departments.push(department.clone()),
    }
    Ok(ok(department))
}

async fn update(
    State(state): State<AppState>,
    Json(req): Json<DepartmentUpdate>,
) -> ApiResult<Json<Envelope<Department>>> {
    let mut data = state.data.write().await;
    let node = find_mut(&mut data.departments, req.id)
        .ok_or_else(|| ApiError::not_found("Department not found"))?;

    if let Some(name) = req.name {
        node.name = name;
    }
    if let Some(code) = req.code {
        node.code = code;
    }
    if let Some(sort) = req.sort {
        node.sort = sort;
    }
    if let Some(status) = req.status {
        node.status = status;
    }
    if let Some(leader) = req.leader {
        node.leader = Some(leader);
    }
    if let Some(phone) = req.phone {
        node.phone = Some(phone);
    }
    if let Some(email) = req.email {
        node.email = Some(email);
    }

    let mut updated = node.clone();
    updated.children = Vec::new();
    Ok(ok(updated))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let mut data = state.data.write().await;
    if !remove_node(&mut data.departments, id) {
        return Err(ApiError::not_found("Department not found"));
    }
    Ok(ok_empty("Delete successful"))
}
