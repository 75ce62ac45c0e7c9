//! 认证接口

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};
use chrono::Utc;
use shared::Envelope;
use shared::models::{ChangePasswordRequest, LoginRequest, LoginResponse, ProfileUpdate, UserInfo};

use crate::api::{ok, ok_empty, ok_message};
use crate::auth::{CurrentUser, TOKEN_TTL_SECS, issue_token};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/userinfo", get(userinfo).put(update_userinfo))
        .route("/password", put(change_password))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<Envelope<LoginResponse>>> {
    let mut data = state.data.write().await;

    let Some(user) = data
        .users
        .iter_mut()
        .find(|u| u.username == req.username && u.password == req.password)
    else {
        return Err(ApiError::unauthorized("Username or password incorrect"));
    };

    user.last_login_time = Some(Utc::now());
    let token = issue_token(&state.jwt_secret, user.id, &user.username)?;
    let response = LoginResponse {
        token,
        user_info: user.to_info(),
        expires_in: Some(TOKEN_TTL_SECS),
    };
    Ok(ok_message(response, "Login successful"))
}

async fn logout() -> Json<Envelope<serde_json::Value>> {
    // tokens are stateless; nothing to revoke
    ok_empty("Logout successful")
}

async fn userinfo(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<Json<Envelope<UserInfo>>> {
    let data = state.data.read().await;
    let user = data
        .user_by_id(current.user_id)
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(ok(user.to_info()))
}

async fn update_userinfo(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<Json<Envelope<UserInfo>>> {
    let mut data = state.data.write().await;
    let user = data
        .users
        .iter_mut()
        .find(|u| u.id == current.user_id)
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if let Some(email) = update.email {
        user.email = email;
    }
    if let Some(phone) = update.phone {
        user.phone = Some(phone);
    }
    if let Some(avatar) = update.avatar {
        user.avatar = Some(avatar);
    }
    Ok(ok(user.to_info()))
}

async fn change_password(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<Envelope<serde_json::Value>>> {
    if req.new_password != req.confirm_password {
        return Err(ApiError::validation("Passwords do not match"));
    }
    if req.new_password.is_empty() {
        return Err(ApiError::validation("Password must not be empty"));
    }

    let mut data = state.data.write().await;
    let user = data
        .users
        .iter_mut()
        .find(|u| u.id == current.user_id)
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if user.password != req.old_password {
        return Err(ApiError::validation("Old password incorrect"));
    }
    user.password = req.new_password;
    Ok(ok_empty("Password changed"))
}
