//! RBAC 权限接口

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use chrono::Utc;
use shared::models::{
    Permission, PermissionCreate, PermissionTreeNode, PermissionUpdate, UserPermissions,
};
use shared::{Envelope, build_menu_tree, build_permission_tree};

use crate::api::{ok, ok_empty};
use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list))
        .route("/tree", get(tree))
        .route("/user", get(user_permissions))
        .route("/create", post(create))
        .route("/update/{id}", put(update))
        .route("/delete/{id}", delete(remove))
}

async fn list(State(state): State<AppState>) -> Json<Envelope<Vec<Permission>>> {
    let data = state.data.read().await;
    ok(data.permissions.clone())
}

async fn tree(State(state): State<AppState>) -> Json<Envelope<Vec<PermissionTreeNode>>> {
    let data = state.data.read().await;
    ok(build_permission_tree(&data.permissions))
}

/// 当前用户的角色、聚合权限集与菜单树
async fn user_permissions(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Envelope<UserPermissions>>> {
    let data = state.data.read().await;
    let roles = data.roles_of(current.user_id);
    let permissions = data.aggregated_permissions(current.user_id);
    let menus = build_menu_tree(&permissions);
    Ok(ok(UserPermissions {
        roles,
        permissions,
        menus,
    }))
}

async fn create(
    State(state): State<AppState>,
    Json(req): Json<PermissionCreate>,
) -> ApiResult<Json<Envelope<Permission>>> {
    let mut data = state.data.write().await;

    if let Some(parent) = req.parent_id
        && data.permission_by_id(parent).is_none()
    {
        return Err(ApiError::validation(format!("parent {parent} does not exist")));
    }
    if data.permissions.iter().any(|p| p.code == req.code) {
        return Err(ApiError::validation(format!("code '{}' already exists", req.code)));
    }

    let now = Utc::now();
    let permission = Permission {
        id: data.next_permission_id(),
        name: req.name,
        code: req.code,
        kind: req.kind,
        parent_id: req.parent_id,
        path: req.path,
        icon: req.icon,
        sort: req.sort,
        status: req.status,
        create_time: now,
        update_time: now,
    };
    data.permissions.push(permission.clone());
    Ok(ok(permission))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<PermissionUpdate>,
) -> ApiResult<Json<Envelope<Permission>>> {
    let mut data = state.data.write().await;
    let permission = data
        .permissions
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| ApiError::not_found("Permission not found"))?;

    if let Some(name) = req.name {
        permission.name = name;
    }
    if let Some(code) = req.code {
        permission.code = code;
    }
    if let Some(kind) = req.kind {
        permission.kind = kind;
    }
    if let Some(parent_id) = req.parent_id {
        permission.parent_id = Some(parent_id);
    }
    if let Some(path) = req.path {
        permission.path = Some(path);
    }
    if let Some(icon) = req.icon {
        permission.icon = Some(icon);
    }
    if let Some(sort) = req.sort {
        permission.sort = sort;
    }
    if let Some(status) = req.status {
        permission.status = status;
    }
    permission.update_time = Utc::now();
    Ok(ok(permission.clone()))
}

/// 删除权限并级联清理角色授权与直接权限边
async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let mut data = state.data.write().await;

    if data.permissions.iter().any(|p| p.parent_id == Some(id)) {
        return Err(ApiError::validation("Permission has children"));
    }
    let before = data.permissions.len();
    data.permissions.retain(|p| p.id != id);
    if data.permissions.len() == before {
        return Err(ApiError::not_found("Permission not found"));
    }
    for role in &mut data.roles {
        role.permission_ids.retain(|pid| *pid != id);
    }
    data.user_permissions.retain(|up| up.permission_id != id);
    Ok(ok_empty("Delete successful"))
}
