//! 标签页（TagView）状态管理
//!
//! Records visited routes as closable tabs. Independent of RBAC; it
//! shares the navigation interception point with the route guard and
//! nothing else.

use std::collections::HashMap;

use crate::guard::Route;

/// One open tab
#[derive(Debug, Clone, PartialEq)]
pub struct TagView {
    pub title: String,
    pub path: String,
    pub name: Option<String>,
    /// 固定标签（如首页），不可关闭
    pub affix: bool,
    pub icon: Option<String>,
    /// Insertion order, preserved when a tab is revisited
    pub seq: usize,
}

/// 标签页追踪器
#[derive(Debug, Default)]
pub struct TagViewTracker {
    visited_views: Vec<TagView>,
    cached_views: Vec<String>,
    refresh_flags: HashMap<String, i64>,
    // monotonic, never reused even after a tab closes
    next_seq: usize,
}

impl TagViewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited_views(&self) -> &[TagView] {
        &self.visited_views
    }

    pub fn cached_views(&self) -> &[String] {
        &self.cached_views
    }

    /// 当前激活的标签
    pub fn active_view(&self, current_path: &str) -> Option<&TagView> {
        self.visited_views.iter().find(|v| v.path == current_path)
    }

    /// 添加标签（仅对 keep_alive 路由生效）
    ///
    /// Revisiting a recorded path refreshes the tab's metadata but keeps
    /// its original position.
    pub fn add_view(&mut self, route: &Route) {
        if !route.keep_alive {
            return;
        }
        if let Some(existing) = self.visited_views.iter_mut().find(|v| v.path == route.path) {
            existing.title = route.title.clone();
            existing.name = route.name.clone();
            existing.affix = route.affix;
            existing.icon = route.icon.clone();
            return;
        }

        self.next_seq += 1;
        self.visited_views.push(TagView {
            title: route.title.clone(),
            path: route.path.clone(),
            name: route.name.clone(),
            affix: route.affix,
            icon: route.icon.clone(),
            seq: self.next_seq,
        });

        if let Some(name) = &route.name {
            self.add_cached_view(name.clone());
        }
    }

    /// 删除标签，返回是否删除成功
    pub fn del_view(&mut self, path: &str) -> bool {
        let Some(index) = self.visited_views.iter().position(|v| v.path == path) else {
            return false;
        };
        let removed = self.visited_views.remove(index);
        if let Some(name) = &removed.name {
            self.del_cached_view(name);
        }
        true
    }

    /// 删除除指定标签外的所有非固定标签
    pub fn del_other_views(&mut self, path: &str) {
        self.visited_views.retain(|v| v.affix || v.path == path);
        self.cached_views = self
            .visited_views
            .iter()
            .filter_map(|v| v.name.clone())
            .collect();
    }

    /// 删除左侧标签（保留固定标签和当前及其右侧）
    pub fn del_left_views(&mut self, path: &str) {
        if let Some(index) = self.visited_views.iter().position(|v| v.path == path)
            && index > 0
        {
            let mut i = 0;
            self.visited_views.retain(|v| {
                let keep = v.affix || i >= index;
                i += 1;
                keep
            });
            self.update_cached_views();
        }
    }

    /// 删除右侧标签（保留固定标签和当前及其左侧）
    pub fn del_right_views(&mut self, path: &str) {
        if let Some(index) = self.visited_views.iter().position(|v| v.path == path)
            && index < self.visited_views.len() - 1
        {
            let mut i = 0;
            self.visited_views.retain(|v| {
                let keep = v.affix || i <= index;
                i += 1;
                keep
            });
            self.update_cached_views();
        }
    }

    /// 删除全部非固定标签
    pub fn del_all_views(&mut self) {
        self.visited_views.retain(|v| v.affix);
        self.cached_views.clear();
    }

    fn add_cached_view(&mut self, name: String) {
        if !name.is_empty() && !self.cached_views.contains(&name) {
            self.cached_views.push(name);
        }
    }

    fn del_cached_view(&mut self, name: &str) {
        self.cached_views.retain(|n| n != name);
    }

    fn update_cached_views(&mut self) {
        self.cached_views = self
            .visited_views
            .iter()
            .filter(|v| !v.affix)
            .filter_map(|v| v.name.clone())
            .collect();
    }

    // ========== 刷新标记 ==========

    /// 标记页面需要刷新
    pub fn mark_view_for_refresh(&mut self, path: &str) {
        self.refresh_flags
            .insert(path.to_string(), chrono::Utc::now().timestamp_millis());
    }

    /// 清除刷新标记
    pub fn clear_refresh_flag(&mut self, path: &str) {
        self.refresh_flags.remove(path);
    }

    /// 获取刷新标记（无标记时返回 0）
    pub fn refresh_flag(&self, path: &str) -> i64 {
        self.refresh_flags.get(path).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str, title: &str) -> Route {
        Route::new(path, title).keep_alive().named(title)
    }

    #[test]
    fn only_keep_alive_routes_record_tabs() {
        let mut tracker = TagViewTracker::new();
        tracker.add_view(&Route::new("/system/file", "文件管理"));
        assert!(tracker.visited_views().is_empty());

        tracker.add_view(&route("/system/user", "UserList"));
        assert_eq!(tracker.visited_views().len(), 1);
        assert_eq!(tracker.cached_views(), ["UserList"]);
    }

    #[test]
    fn revisit_updates_in_place() {
        let mut tracker = TagViewTracker::new();
        tracker.add_view(&route("/a", "A"));
        tracker.add_view(&route("/b", "B"));
        tracker.add_view(&route("/a", "A2"));

        let paths: Vec<&str> = tracker.visited_views().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, ["/a", "/b"]);
        assert_eq!(tracker.visited_views()[0].title, "A2");
        assert_eq!(tracker.visited_views()[0].seq, 1);
    }

    #[test]
    fn del_view_removes_tab_and_cache() {
        let mut tracker = TagViewTracker::new();
        tracker.add_view(&route("/a", "A"));
        tracker.add_view(&route("/b", "B"));

        assert!(tracker.del_view("/a"));
        assert!(!tracker.del_view("/a"));
        assert_eq!(tracker.visited_views().len(), 1);
        assert_eq!(tracker.cached_views(), ["B"]);
    }

    #[test]
    fn del_others_keeps_affix_and_current() {
        let mut tracker = TagViewTracker::new();
        tracker.add_view(&Route::new("/dashboard", "Dashboard").keep_alive().affix().named("Dashboard"));
        tracker.add_view(&route("/a", "A"));
        tracker.add_view(&route("/b", "B"));
        tracker.add_view(&route("/c", "C"));

        tracker.del_other_views("/b");
        let paths: Vec<&str> = tracker.visited_views().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, ["/dashboard", "/b"]);
    }

    #[test]
    fn del_left_and_right_respect_affix() {
        let mut tracker = TagViewTracker::new();
        tracker.add_view(&Route::new("/dashboard", "Dashboard").keep_alive().affix().named("Dashboard"));
        tracker.add_view(&route("/a", "A"));
        tracker.add_view(&route("/b", "B"));
        tracker.add_view(&route("/c", "C"));

        tracker.del_left_views("/b");
        let paths: Vec<&str> = tracker.visited_views().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, ["/dashboard", "/b", "/c"]);

        tracker.del_right_views("/b");
        let paths: Vec<&str> = tracker.visited_views().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, ["/dashboard", "/b"]);
    }

    #[test]
    fn del_all_keeps_only_affix() {
        let mut tracker = TagViewTracker::new();
        tracker.add_view(&Route::new("/dashboard", "Dashboard").keep_alive().affix().named("Dashboard"));
        tracker.add_view(&route("/a", "A"));

        tracker.del_all_views();
        assert_eq!(tracker.visited_views().len(), 1);
        assert!(tracker.visited_views()[0].affix);
        assert!(tracker.cached_views().is_empty());
    }

    #[test]
    fn seq_is_never_reused_after_a_close() {
        let mut tracker = TagViewTracker::new();
        tracker.add_view(&route("/a", "A"));
        tracker.add_view(&route("/b", "B"));
        assert!(tracker.del_view("/a"));
        tracker.add_view(&route("/c", "C"));

        let mut seqs: Vec<usize> = tracker.visited_views().iter().map(|v| v.seq).collect();
        seqs.sort_unstable();
        seqs.dedup();
        assert_eq!(seqs.len(), tracker.visited_views().len());

        let c = tracker.visited_views().iter().find(|v| v.path == "/c").unwrap();
        assert_eq!(c.seq, 3);
    }

    #[test]
    fn refresh_flags_round_trip() {
        let mut tracker = TagViewTracker::new();
        assert_eq!(tracker.refresh_flag("/a"), 0);
        tracker.mark_view_for_refresh("/a");
        assert!(tracker.refresh_flag("/a") > 0);
        tracker.clear_refresh_flag("/a");
        assert_eq!(tracker.refresh_flag("/a"), 0);
    }
}
