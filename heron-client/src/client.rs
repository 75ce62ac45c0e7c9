//! Admin client facade
//!
//! Wires the transport, session store, permission store, tag tracker
//! and route table together, and drives the navigation guard.

use tracing::warn;

use crate::dict::DictionaryStore;
use crate::guard::{GuardDecision, HOME_PATH, LOGIN_PATH, Route, RouteTable, decide};
use crate::http::HttpClient;
use crate::permission::PermissionStore;
use crate::session::SessionStore;
use crate::storage::TokenStorage;
use crate::tags::TagViewTracker;
use crate::{ClientConfig, ClientResult};

/// 管理端客户端
///
/// Each store owns one slice of mutable state and is the only writer
/// for it; the facade threads them through the guard loop.
#[derive(Debug)]
pub struct AdminClient {
    http: HttpClient,
    session: SessionStore,
    permissions: PermissionStore,
    tags: TagViewTracker,
    dict: DictionaryStore,
    routes: RouteTable,
    current_path: String,
}

impl AdminClient {
    /// Create a client with the default route table
    pub fn new(config: ClientConfig) -> Self {
        Self::with_routes(config, RouteTable::default())
    }

    pub fn with_routes(config: ClientConfig, routes: RouteTable) -> Self {
        let http = HttpClient::new(&config);
        let storage = config.storage_dir.as_ref().map(TokenStorage::new);
        let session = SessionStore::new(http.clone(), storage);
        Self {
            http,
            session,
            permissions: PermissionStore::new(),
            tags: TagViewTracker::new(),
            dict: DictionaryStore::new(),
            routes,
            current_path: LOGIN_PATH.to_string(),
        }
    }

    // ========== State access ==========

    /// Raw transport, for the area API methods
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn permissions(&self) -> &PermissionStore {
        &self.permissions
    }

    pub fn tags(&self) -> &TagViewTracker {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TagViewTracker {
        &mut self.tags
    }

    pub fn dict_mut(&mut self) -> &mut DictionaryStore {
        &mut self.dict
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The path the last navigation landed on
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    // ========== Convenience predicates ==========

    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.has_permission(code)
    }

    pub fn has_role(&self, code: &str) -> bool {
        self.permissions.has_role(code)
    }

    // ========== Session lifecycle ==========

    /// 登录并初始化权限数据
    ///
    /// Rejected credentials return `Ok(false)` and leave all state
    /// untouched. A permission bootstrap failure after a successful
    /// login is logged and deferred: the route guard retries the load
    /// on the next navigation.
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<bool> {
        if !self.session.login(username, password).await? {
            return Ok(false);
        }
        if let Err(e) = self.permissions.init_permissions(&self.http).await {
            warn!("permission bootstrap after login failed: {e}");
        }
        Ok(true)
    }

    /// 登出并清空本地状态
    pub async fn logout(&mut self) {
        self.session.logout().await;
        self.permissions.clear_permissions();
        self.dict.clear_all();
        self.tags.del_all_views();
        self.current_path = LOGIN_PATH.to_string();
    }

    /// 校验会话，失败时走完整的登出清理
    pub async fn check_auth_status(&mut self) -> bool {
        if self.session.check_auth_status().await {
            true
        } else {
            // session state is already cleared; tear down the rest too
            self.permissions.clear_permissions();
            self.dict.clear_all();
            self.tags.del_all_views();
            self.current_path = LOGIN_PATH.to_string();
            false
        }
    }

    // ========== Navigation ==========

    /// 导航到目标路径，返回最终到达的路径
    ///
    /// Drives the guard decision loop: redirects replace the target,
    /// and a `LoadPermissions` decision blocks the navigation, loads
    /// the permission data, then replays the same target exactly once.
    /// A failed load logs the user out and lands on the login page.
    pub async fn navigate(&mut self, path: &str) -> ClientResult<String> {
        let mut target = path.to_string();
        let mut loaded = false;
        loop {
            let route = self.routes.resolve(&target).clone();
            let decision = decide(
                self.session.is_authenticated(),
                self.permissions.menus_loaded(),
                &route,
            );
            match decision {
                GuardDecision::Allow => {
                    self.arrive(&route);
                    return Ok(self.current_path.clone());
                }
                GuardDecision::RedirectToLogin => {
                    target = LOGIN_PATH.to_string();
                }
                GuardDecision::RedirectToHome => {
                    target = HOME_PATH.to_string();
                }
                GuardDecision::LoadPermissions if !loaded => {
                    loaded = true;
                    if let Err(e) = self.permissions.init_permissions(&self.http).await {
                        warn!("permission bootstrap failed, logging out: {e}");
                        self.logout().await;
                        target = LOGIN_PATH.to_string();
                    }
                    // on success the same target is replayed
                }
                GuardDecision::LoadPermissions => {
                    // bundle loaded but the user has no menus; let the
                    // navigation through rather than loop
                    warn!(path = %route.path, "menu list empty after permission load");
                    self.arrive(&route);
                    return Ok(self.current_path.clone());
                }
            }
        }
    }

    fn arrive(&mut self, route: &Route) {
        if self.tags.refresh_flag(&self.current_path) > 0 {
            let leaving = self.current_path.clone();
            self.tags.clear_refresh_flag(&leaving);
        }
        self.tags.add_view(route);
        self.current_path = route.path.clone();
    }
}
