//! 用户管理接口

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use chrono::Utc;
use shared::Envelope;
use shared::models::{AssignRolesRequest, Role, UserCreate, UserRecord, UserRole, UserUpdate};

use crate::api::{ok, ok_empty, ok_message};
use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, MockUser, UserPermissionEdge};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(list))
        .route("/create", post(create))
        .route("/update/{id}", put(update))
        .route("/delete/{id}", delete(remove))
        .route("/batch-create", post(batch_create))
        .route("/{id}/roles", get(roles_of).post(assign_roles))
        .route("/{id}/roles/{role_id}", delete(remove_role))
}

async fn list(State(state): State<AppState>) -> Json<Envelope<Vec<UserRecord>>> {
    let data = state.data.read().await;
    let records = data.users.iter().map(|u| data.user_record(u)).collect();
    ok(records)
}

fn insert_user(data: &mut crate::state::MockData, req: UserCreate) -> UserRecord {
    let id = data.next_user_id();
    // display label follows the first assigned role
    let role = req
        .role_ids
        .first()
        .and_then(|rid| data.roles.iter().find(|r| r.id == *rid))
        .map(|r| r.code.clone())
        .unwrap_or_else(|| "user".to_string());

    let user = MockUser {
        id,
        username: req.username,
        password: req.password,
        email: req.email,
        phone: req.phone,
        avatar: req.avatar,
        role,
        create_time: Utc::now(),
        last_login_time: None,
        status: req.status.unwrap_or_default(),
        dept_id: req.dept_id,
    };
    data.users.push(user);

    for role_id in req.role_ids {
        data.user_roles.push(UserRole { user_id: id, role_id });
    }
    for permission_id in req.permission_ids {
        data.user_permissions.push(UserPermissionEdge { user_id: id, permission_id });
    }

    let user = data.user_by_id(id).expect("just inserted");
    data.user_record(user)
}

async fn create(
    State(state): State<AppState>,
    Json(req): Json<UserCreate>,
) -> ApiResult<Json<Envelope<UserRecord>>> {
    let mut data = state.data.write().await;
    if data.user_by_name(&req.username).is_some() {
        return Err(ApiError::validation(format!(
            "username '{}' already exists",
            req.username
        )));
    }
    Ok(ok(insert_user(&mut data, req)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UserUpdate>,
) -> ApiResult<Json<Envelope<UserRecord>>> {
    let mut data = state.data.write().await;
    let user = data
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if let Some(email) = req.email {
        user.email = email;
    }
    if let Some(phone) = req.phone {
        user.phone = Some(phone);
    }
    if let Some(avatar) = req.avatar {
        user.avatar = Some(avatar);
    }
    if let Some(status) = req.status {
        user.status = status;
    }
    if let Some(dept_id) = req.dept_id {
        user.dept_id = Some(dept_id);
    }

    // 角色/权限关联整体替换
    if let Some(role_ids) = req.role_ids {
        data.user_roles.retain(|ur| ur.user_id != id);
        for role_id in role_ids {
            data.user_roles.push(UserRole { user_id: id, role_id });
        }
    }
    if let Some(permission_ids) = req.permission_ids {
        data.user_permissions.retain(|up| up.user_id != id);
        for permission_id in permission_ids {
            data.user_permissions.push(UserPermissionEdge { user_id: id, permission_id });
        }
    }

    let user = data.user_by_id(id).expect("checked above");
    Ok(ok(data.user_record(user)))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let mut data = state.data.write().await;
    let before = data.users.len();
    data.users.retain(|u| u.id != id);
    if data.users.len() == before {
        return Err(ApiError::not_found("User not found"));
    }
    data.user_roles.retain(|ur| ur.user_id != id);
    data.user_permissions.retain(|up| up.user_id != id);
    Ok(ok_empty("Delete successful"))
}

/// 批量导入，默认分配普通用户角色
async fn batch_create(
    State(state): State<AppState>,
    Json(reqs): Json<Vec<UserCreate>>,
) -> ApiResult<Json<Envelope<Vec<UserRecord>>>> {
    let mut data = state.data.write().await;
    let default_role = data.roles.iter().find(|r| r.code == "user").map(|r| r.id);

    let mut created = Vec::with_capacity(reqs.len());
    for mut req in reqs {
        if data.user_by_name(&req.username).is_some() {
            return Err(ApiError::validation(format!(
                "username '{}' already exists",
                req.username
            )));
        }
        if req.password.is_empty() {
            req.password = "123456".to_string();
        }
        if req.role_ids.is_empty()
            && let Some(role_id) = default_role
        {
            req.role_ids.push(role_id);
        }
        created.push(insert_user(&mut data, req));
    }
    Ok(ok_message(created, "Import successful"))
}

async fn roles_of(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Envelope<Vec<Role>>>> {
    let data = state.data.read().await;
    data.user_by_id(id)
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(ok(data.roles_of(id)))
}

/// 整体替换用户的角色
async fn assign_roles(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AssignRolesRequest>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let mut data = state.data.write().await;
    data.user_by_id(id)
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    for role_id in &req.role_ids {
        if !data.roles.iter().any(|r| r.id == *role_id) {
            return Err(ApiError::validation(format!("role {role_id} does not exist")));
        }
    }
    data.user_roles.retain(|ur| ur.user_id != id);
    for role_id in req.role_ids {
        data.user_roles.push(UserRole { user_id: id, role_id });
    }
    Ok(ok_empty("Roles assigned"))
}

async fn remove_role(
    State(state): State<AppState>,
    Path((id, role_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    let mut data = state.data.write().await;
    let before = data.user_roles.len();
    data.user_roles
        .retain(|ur| !(ur.user_id == id && ur.role_id == role_id));
    if data.user_roles.len() == before {
        return Err(ApiError::not_found("Role assignment not found"));
    }
    Ok(ok_empty("Role removed"))
}
