//! 角色管理接口

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use chrono::Utc;
use shared::Envelope;
use shared::models::{AssignPermissionsRequest, Permission, Role, RoleCreate, RoleUpdate};

use crate::api::{ok, ok_empty};
use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, MockRole};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list))
        .route("/detail/{id}", get(detail))
        .route("/create", post(create))
        .route("/update/{id}", put(update))
        .route("/delete/{id}", delete(remove))
        .route("/{id}/permissions", get(permissions_of).post(assign_permissions))
}

async fn list(State(state): State<AppState>) -> Json<Envelope<Vec<Role>>> {
    let data = state.data.read().await;
    let roles = data.roles.iter().map(|r| data.materialize_role(r)).collect();
    ok(roles)
}

async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<Role>>> {
    let data = state.data.read().await;
    let role = data
        .roles
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| ApiError::not_found("Role not found"))?;
    Ok(ok(data.materialize_role(role)))
}

async fn create(
    State(state): State<AppState>,
    Json(req): Json<RoleCreate>,
) -> ApiResult<Json<Envelope<Role>>> {
    let mut data = state.data.write().await;
    if data.roles.iter().any(|r| r.code == req.code) {
        return Err(ApiError::validation(format!("code '{}' already exists", req.code)));
    }
    for pid in &req.permission_ids {
        if data.permission_by_id(*pid).is_none() {
            return Err(ApiError::validation(format!("permission {pid} does not exist")));
        }
    }

    let now = Utc::now();
    let role = MockRole {
        id: data.next_role_id(),
        name: req.name,
        code: req.code,
        description: req.description,
        status: req.status,
        permission_ids: req.permission_ids,
        create_time: now,
        update_time: now,
    };
    data.roles.push(role.clone());
    Ok(ok(data.materialize_role(&role)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RoleUpdate>,
) -> ApiResult<Json<Envelope<Role>>> {
    let mut data = state.data.write().await;
    let role = data
        .roles
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| ApiError::not_found("Role not found"))?;

    if let Some(name) = req.name {
        role.name = name;
    }
    if let Some(code) = req.code {
        role.code = code;
    }
    if let Some(description) = req.description {
        role.description = Some(description);
    }
    if let Some(status) = req.status {
        role.status = status;
    }
    if let Some(permission_ids) = req.permission_ids {
        role.permission_ids = permission_ids;
    }
    role.update_time = Utc::now();

    let role = role.clone();
    Ok(ok(data.materialize_role(&role)))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let mut data = state.data.write().await;
    let before = data.roles.len();
    data.roles.retain(|r| r.id != id);
    if data.roles.len() == before {
        return Err(ApiError::not_found("Role not found"));
    }
    data.user_roles.retain(|ur| ur.role_id != id);
    Ok(ok_empty("Delete successful"))
}

async fn permissions_of(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<Vec<Permission>>>> {
    let data = state.data.read().await;
    let role = data
        .roles
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| ApiError::not_found("Role not found"))?;
    Ok(ok(data.materialize_role(role).permissions))
}

/// 整体替换角色的权限授予
async fn assign_permissions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AssignPermissionsRequest>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let mut data = state.data.write().await;
    for pid in &req.permission_ids {
        if data.permission_by_id(*pid).is_none() {
            return Err(ApiError::validation(format!("permission {pid} does not exist")));
        }
    }
    let role = data
        .roles
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| ApiError::not_found("Role not found"))?;
    role.permission_ids = req.permission_ids;
    role.update_time = Utc::now();
    Ok(ok_empty("Permissions assigned"))
}
