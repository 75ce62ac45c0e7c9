//! Session store
//!
//! Owns the bearer token lifecycle: login, logout, profile refresh, and
//! the persisted-token restore on startup. The token cell inside
//! [`HttpClient`] is written exclusively here.

use tracing::{debug, warn};

use shared::models::{ChangePasswordRequest, LoginRequest, ProfileUpdate, UserInfo};

use crate::http::HttpClient;
use crate::storage::TokenStorage;
use crate::{ClientError, ClientResult};

/// 会话状态管理
#[derive(Debug)]
pub struct SessionStore {
    http: HttpClient,
    storage: Option<TokenStorage>,
    user_info: Option<UserInfo>,
}

impl SessionStore {
    /// Create a session store. A previously persisted token is restored
    /// into the transport; the profile is always refetched.
    pub fn new(http: HttpClient, storage: Option<TokenStorage>) -> Self {
        if let Some(storage) = &storage
            && let Some(token) = storage.load()
        {
            debug!(path = %storage.path().display(), "restored persisted token");
            http.set_token(Some(token));
        }
        Self {
            http,
            storage,
            user_info: None,
        }
    }

    /// Whether a token is currently held
    pub fn is_authenticated(&self) -> bool {
        self.http.token().is_some()
    }

    /// Cached user profile, if fetched this session
    pub fn user_info(&self) -> Option<&UserInfo> {
        self.user_info.as_ref()
    }

    /// 登录
    ///
    /// On success the token is stored (and persisted when a storage dir
    /// is configured), the profile is cached, and `true` is returned.
    /// Rejected credentials come back as `Ok(false)` with the stored
    /// token left untouched; only transport faults are errors.
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<bool> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            remember: None,
        };
        let response: shared::models::LoginResponse =
            match self.http.post("/auth/login", &request).await {
                Ok(response) => response,
                Err(e) if e.is_auth_failure() => {
                    debug!(username, "login rejected");
                    return Ok(false);
                }
                Err(e) => return Err(e),
            };

        self.http.set_token(Some(response.token.clone()));
        if let Some(storage) = &self.storage
            && let Err(e) = storage.save(&response.token)
        {
            warn!("failed to persist token: {e}");
        }
        self.user_info = Some(response.user_info);
        debug!(username, "login succeeded");
        Ok(true)
    }

    /// 登出
    ///
    /// Server notification is best-effort; local state is cleared
    /// regardless of the outcome.
    pub async fn logout(&mut self) {
        if self.is_authenticated()
            && let Err(e) = self.http.post_empty("/auth/logout").await
        {
            warn!("logout notification failed: {e}");
        }
        self.clear_local();
    }

    /// 获取当前用户信息
    ///
    /// Requires a token. Any failure invalidates the token: it is
    /// cleared before the error is re-raised.
    pub async fn fetch_user_info(&mut self) -> ClientResult<UserInfo> {
        if !self.is_authenticated() {
            return Err(ClientError::NotLoggedIn);
        }
        match self.http.get::<UserInfo>("/auth/userinfo").await {
            Ok(info) => {
                self.user_info = Some(info.clone());
                Ok(info)
            }
            Err(e) => {
                warn!("user info fetch failed, clearing token: {e}");
                self.clear_local();
                Err(e)
            }
        }
    }

    /// 校验会话是否有效
    ///
    /// No token means no session; otherwise the profile fetch decides.
    pub async fn check_auth_status(&mut self) -> bool {
        if !self.is_authenticated() {
            return false;
        }
        match self.fetch_user_info().await {
            Ok(_) => true,
            Err(_) => {
                // fetch_user_info already cleared the token
                self.clear_local();
                false
            }
        }
    }

    /// 修改密码
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> ClientResult<()> {
        let request = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
            confirm_password: new_password.to_string(),
        };
        self.http.put_unit("/auth/password", &request).await
    }

    /// 更新个人资料
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> ClientResult<UserInfo> {
        let info: UserInfo = self.http.put("/auth/userinfo", update).await?;
        self.user_info = Some(info.clone());
        Ok(info)
    }

    /// Drop token, persisted copy, and cached profile
    fn clear_local(&mut self) {
        self.http.set_token(None);
        self.user_info = None;
        if let Some(storage) = &self.storage
            && let Err(e) = storage.delete()
        {
            warn!("failed to remove persisted token: {e}");
        }
    }
}
