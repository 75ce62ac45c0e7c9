//! Route guard
//!
//! Each navigation attempt runs through a single decision function with
//! three reachable outcomes for protected routes:
//!
//! 1. unauthenticated -> redirect to login, replacing the navigation
//! 2. authenticated but menus not yet loaded -> load permissions, then
//!    retry the same navigation exactly once
//! 3. authenticated with menus loaded (or the route is public) -> allow
//!
//! The function is pure; the retry loop and the bootstrap-failure
//! logout live in the [`AdminClient`](crate::AdminClient) driver.

/// Route metadata the guard and the tag tracker read
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub path: String,
    pub title: String,
    pub requires_auth: bool,
    /// Pinned tab, survives "close all"
    pub affix: bool,
    /// Whether visiting this route records a tab
    pub keep_alive: bool,
    pub icon: Option<String>,
    pub name: Option<String>,
}

impl Route {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            requires_auth: true,
            affix: false,
            keep_alive: false,
            icon: None,
            name: None,
        }
    }

    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    pub fn affix(mut self) -> Self {
        self.affix = true;
        self
    }

    pub fn keep_alive(mut self) -> Self {
        self.keep_alive = true;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Flat route table with a catch-all fallback
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    fallback: Route,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes,
            fallback: Route::new(NOT_FOUND_PATH, "页面未找到").public(),
        }
    }

    /// Exact path match; unknown paths resolve to the 404 route
    pub fn resolve(&self, path: &str) -> &Route {
        self.routes
            .iter()
            .find(|r| r.path == path)
            .unwrap_or(&self.fallback)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/dashboard";
pub const NOT_FOUND_PATH: &str = "/404";

impl Default for RouteTable {
    /// The stock admin layout: login, dashboard (pinned), system pages
    fn default() -> Self {
        Self::new(vec![
            Route::new(LOGIN_PATH, "登录").public().named("Login"),
            Route::new(HOME_PATH, "仪表盘")
                .affix()
                .keep_alive()
                .icon("Odometer")
                .named("Dashboard"),
            Route::new("/system/user", "用户列表")
                .keep_alive()
                .named("UserList"),
            Route::new("/system/role", "角色管理")
                .keep_alive()
                .named("RoleList"),
            Route::new("/system/permission", "权限管理")
                .keep_alive()
                .named("PermissionList"),
            Route::new("/system/department", "部门管理")
                .keep_alive()
                .named("DepartmentList"),
            Route::new("/system/dict", "数据字典")
                .keep_alive()
                .named("DictList"),
            Route::new("/system/file", "文件管理").named("FileList"),
            Route::new("/system/log", "操作日志").named("LogList"),
            Route::new("/system/profile", "个人资料")
                .keep_alive()
                .named("Profile"),
        ])
    }
}

/// Outcome of one guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to the requested route
    Allow,
    /// Replace the navigation with the login page
    RedirectToLogin,
    /// Already logged in, bounce off the login page
    RedirectToHome,
    /// Block, load permissions, then retry this navigation once
    LoadPermissions,
}

/// Evaluate one navigation attempt
pub fn decide(authenticated: bool, menus_loaded: bool, route: &Route) -> GuardDecision {
    if route.path == LOGIN_PATH {
        return if authenticated {
            GuardDecision::RedirectToHome
        } else {
            GuardDecision::Allow
        };
    }
    if !route.requires_auth {
        return GuardDecision::Allow;
    }
    if !authenticated {
        return GuardDecision::RedirectToLogin;
    }
    if !menus_loaded {
        return GuardDecision::LoadPermissions;
    }
    GuardDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_protected_route_redirects_to_login() {
        let route = Route::new("/system/user", "用户列表");
        assert_eq!(decide(false, false, &route), GuardDecision::RedirectToLogin);
    }

    #[test]
    fn public_route_always_allowed() {
        let route = Route::new("/404", "页面未找到").public();
        assert_eq!(decide(false, false, &route), GuardDecision::Allow);
        assert_eq!(decide(true, true, &route), GuardDecision::Allow);
    }

    #[test]
    fn authenticated_without_menus_loads_permissions_first() {
        let route = Route::new("/dashboard", "仪表盘");
        assert_eq!(decide(true, false, &route), GuardDecision::LoadPermissions);
    }

    #[test]
    fn authenticated_with_menus_is_allowed() {
        let route = Route::new("/dashboard", "仪表盘");
        assert_eq!(decide(true, true, &route), GuardDecision::Allow);
    }

    #[test]
    fn login_page_bounces_authenticated_users() {
        let table = RouteTable::default();
        let login = table.resolve(LOGIN_PATH);
        assert_eq!(decide(true, true, login), GuardDecision::RedirectToHome);
        assert_eq!(decide(false, false, login), GuardDecision::Allow);
    }

    #[test]
    fn unknown_path_resolves_to_not_found() {
        let table = RouteTable::default();
        let route = table.resolve("/no/such/page");
        assert_eq!(route.path, NOT_FOUND_PATH);
        assert!(!route.requires_auth);
    }
}
