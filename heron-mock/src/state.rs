//! In-memory mock state
//!
//! All data lives behind one `RwLock`; handlers take short read or
//! write guards. The seed mirrors a small company setup: two accounts,
//! a three-level department tree, and an RBAC catalog of thirteen
//! permissions across three roles.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tokio::sync::RwLock;

use shared::models::{
    AuditLog, DashboardData, Department, DictItem, DictType, DistributionSlice, FileRecord,
    LogStatus, Notice, NoticeKind, NoticeTag, Permission, PermissionKind, Role, Status,
    Transaction, TransactionStatus, UserInfo, UserRecord, UserRole,
};

pub const DEFAULT_JWT_SECRET: &str = "heron-mock-secret";

/// 共享应用状态
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<RwLock<MockData>>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_secret(DEFAULT_JWT_SECRET)
    }

    pub fn with_secret(secret: &str) -> Self {
        Self {
            data: Arc::new(RwLock::new(MockData::seed())),
            jwt_secret: Arc::from(secret),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// 用户记录（含密码，密码永不出现在响应里）
#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: String,
    pub create_time: DateTime<Utc>,
    pub last_login_time: Option<DateTime<Utc>>,
    pub status: Status,
    pub dept_id: Option<i64>,
}

impl MockUser {
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            avatar: self.avatar.clone(),
            role: self.role.clone(),
            create_time: self.create_time,
            last_login_time: self.last_login_time,
            status: self.status,
        }
    }
}

/// 角色记录，权限以 id 引用，输出时再物化
#[derive(Debug, Clone)]
pub struct MockRole {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub status: Status,
    pub permission_ids: Vec<i64>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// 用户直接权限边
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserPermissionEdge {
    pub user_id: i64,
    pub permission_id: i64,
}

#[derive(Debug)]
pub struct MockData {
    pub users: Vec<MockUser>,
    pub user_roles: Vec<UserRole>,
    pub user_permissions: Vec<UserPermissionEdge>,
    pub permissions: Vec<Permission>,
    pub roles: Vec<MockRole>,
    pub departments: Vec<Department>,
    pub dict_types: Vec<DictType>,
    pub dict_items: Vec<DictItem>,
    pub files: Vec<FileRecord>,
    pub logs: Vec<AuditLog>,
    pub notices: Vec<Notice>,
    pub dashboard: DashboardData,
    pub transactions: Vec<Transaction>,
}

impl MockData {
    // ========== Lookups ==========

    pub fn user_by_name(&self, username: &str) -> Option<&MockUser> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn user_by_id(&self, id: i64) -> Option<&MockUser> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn permission_by_id(&self, id: i64) -> Option<&Permission> {
        self.permissions.iter().find(|p| p.id == id)
    }

    /// 物化角色：把权限 id 展开成完整权限记录
    pub fn materialize_role(&self, role: &MockRole) -> Role {
        Role {
            id: role.id,
            name: role.name.clone(),
            code: role.code.clone(),
            description: role.description.clone(),
            status: role.status,
            permissions: role
                .permission_ids
                .iter()
                .filter_map(|id| self.permission_by_id(*id).cloned())
                .collect(),
            create_time: role.create_time,
            update_time: role.update_time,
        }
    }

    /// 用户持有的角色（物化后）
    pub fn roles_of(&self, user_id: i64) -> Vec<Role> {
        self.user_roles
            .iter()
            .filter(|ur| ur.user_id == user_id)
            .filter_map(|ur| self.roles.iter().find(|r| r.id == ur.role_id))
            .map(|r| self.materialize_role(r))
            .collect()
    }

    /// 用户的直接权限（不经过角色）
    pub fn direct_permissions_of(&self, user_id: i64) -> Vec<Permission> {
        self.user_permissions
            .iter()
            .filter(|up| up.user_id == user_id)
            .filter_map(|up| self.permission_by_id(up.permission_id).cloned())
            .collect()
    }

    /// 用户的聚合权限集：角色权限 + 直接权限，按 id 去重
    pub fn aggregated_permissions(&self, user_id: i64) -> Vec<Permission> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for role in self.roles_of(user_id) {
            for perm in role.permissions {
                if seen.insert(perm.id) {
                    out.push(perm);
                }
            }
        }
        for perm in self.direct_permissions_of(user_id) {
            if seen.insert(perm.id) {
                out.push(perm);
            }
        }
        out
    }

    /// 用户列表行：档案加上关联的角色与直接权限
    pub fn user_record(&self, user: &MockUser) -> UserRecord {
        UserRecord {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            avatar: user.avatar.clone(),
            role: user.role.clone(),
            create_time: user.create_time,
            status: user.status,
            dept_id: user.dept_id,
            roles: self.roles_of(user.id),
            permissions: self.direct_permissions_of(user.id),
        }
    }

    pub fn next_user_id(&self) -> i64 {
        self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1
    }

    pub fn next_role_id(&self) -> i64 {
        self.roles.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    pub fn next_permission_id(&self) -> i64 {
        self.permissions.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    // ========== Seed ==========

    pub fn seed() -> Self {
        let permissions = seed_permissions();
        Self {
            users: seed_users(),
            user_roles: vec![
                UserRole { user_id: 1, role_id: 1 },
                UserRole { user_id: 2, role_id: 3 },
            ],
            user_permissions: Vec::new(),
            roles: seed_roles(&permissions),
            permissions,
            departments: seed_departments(),
            dict_types: seed_dict_types(),
            dict_items: seed_dict_items(),
            files: seed_files(),
            logs: seed_logs(),
            notices: seed_notices(),
            dashboard: seed_dashboard(),
            transactions: seed_transactions(),
        }
    }
}

/// 固定格式的种子时间戳
fn ts(s: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .expect("fixture timestamp")
        .and_utc()
}

fn seed_users() -> Vec<MockUser> {
    vec![
        MockUser {
            id: 1,
            username: "admin".to_string(),
            password: "123456".to_string(),
            email: "admin@example.com".to_string(),
            phone: None,
            avatar: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=admin".to_string()),
            role: "admin".to_string(),
            create_time: ts("2025-01-01 10:00:00"),
            last_login_time: None,
            status: Status::Active,
            dept_id: Some(1),
        },
        MockUser {
            id: 2,
            username: "user1".to_string(),
            password: "123456".to_string(),
            email: "user1@example.com".to_string(),
            phone: None,
            avatar: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=user1".to_string()),
            role: "user".to_string(),
            create_time: ts("2025-01-02 14:30:00"),
            last_login_time: None,
            status: Status::Active,
            dept_id: Some(4),
        },
    ]
}

fn perm(
    id: i64,
    name: &str,
    code: &str,
    kind: PermissionKind,
    parent_id: Option<i64>,
    path: Option<&str>,
    icon: Option<&str>,
    sort: i32,
) -> Permission {
    Permission {
        id,
        name: name.to_string(),
        code: code.to_string(),
        kind,
        parent_id,
        path: path.map(str::to_string),
        icon: icon.map(str::to_string),
        sort,
        status: Status::Active,
        create_time: ts("2025-01-01 00:00:00"),
        update_time: ts("2025-01-01 00:00:00"),
    }
}

fn seed_permissions() -> Vec<Permission> {
    use PermissionKind::{Button, Menu};
    vec![
        perm(1, "route.system", "system", Menu, None, Some("/system"), Some("Setting"), 1),
        perm(2, "route.userList", "system:user", Menu, Some(1), Some("/system/user"), Some("User"), 1),
        perm(3, "route.roleManagement", "system:role", Menu, Some(1), Some("/system/role"), Some("UserCheck"), 2),
        perm(4, "route.permissionManagement", "system:permission", Menu, Some(1), Some("/system/permission"), Some("Shield"), 3),
        perm(10, "route.department", "system:dept", Menu, Some(1), Some("/system/department"), Some("OfficeBuilding"), 4),
        perm(11, "route.dict", "system:dict", Menu, Some(1), Some("/system/dict"), Some("Collection"), 5),
        perm(12, "route.auditLog", "system:log", Menu, Some(1), Some("/system/log"), Some("Document"), 6),
        perm(13, "route.editorDemo", "system:editor", Menu, Some(1), Some("/system/editor"), Some("EditPen"), 7),
        perm(5, "route.dashboard", "dashboard", Menu, None, Some("/dashboard"), Some("Odometer"), 0),
        perm(6, "User View", "user:view", Button, Some(2), None, None, 1),
        perm(7, "User Create", "user:create", Button, Some(2), None, None, 2),
        perm(8, "User Edit", "user:edit", Button, Some(2), None, None, 3),
        perm(9, "User Delete", "user:delete", Button, Some(2), None, None, 4),
    ]
}

fn seed_roles(permissions: &[Permission]) -> Vec<MockRole> {
    let all: Vec<i64> = permissions.iter().map(|p| p.id).collect();
    vec![
        MockRole {
            id: 1,
            name: "Super Admin".to_string(),
            code: "super_admin".to_string(),
            description: Some("Has all system permissions".to_string()),
            status: Status::Active,
            permission_ids: all.clone(),
            create_time: ts("2025-01-01 00:00:00"),
            update_time: ts("2025-01-01 00:00:00"),
        },
        MockRole {
            id: 2,
            name: "Admin".to_string(),
            code: "admin".to_string(),
            description: Some("Has most management permissions".to_string()),
            status: Status::Active,
            // 不含用户删除权限
            permission_ids: all.iter().copied().filter(|id| *id != 9).collect(),
            create_time: ts("2025-01-01 00:00:00"),
            update_time: ts("2025-01-01 00:00:00"),
        },
        MockRole {
            id: 3,
            name: "User".to_string(),
            code: "user".to_string(),
            description: Some("Basic user permissions".to_string()),
            status: Status::Active,
            // 仅仪表盘和用户查看
            permission_ids: vec![5, 6],
            create_time: ts("2025-01-01 00:00:00"),
            update_time: ts("2025-01-01 00:00:00"),
        },
    ]
}

fn dept(
    id: i64,
    parent_id: Option<i64>,
    name: &str,
    code: &str,
    sort: i32,
    leader: &str,
    phone: &str,
    email: &str,
    children: Vec<Department>,
) -> Department {
    Department {
        id,
        parent_id,
        name: name.to_string(),
        code: code.to_string(),
        sort,
        status: Status::Active,
        leader: Some(leader.to_string()),
        phone: Some(phone.to_string()),
        email: Some(email.to_string()),
        create_time: ts("2024-01-01 09:00:00"),
        children,
    }
}

fn seed_departments() -> Vec<Department> {
    vec![dept(
        1,
        None,
        "Headquarters",
        "HQ",
        1,
        "CEO",
        "010-12345678",
        "ceo@example.com",
        vec![
            dept(
                2,
                Some(1),
                "R&D Department",
                "RD",
                1,
                "CTO",
                "010-87654321",
                "rd@example.com",
                vec![
                    dept(4, Some(2), "Frontend Group", "FE", 1, "Frontend Lead", "010-11111111", "fe@example.com", vec![]),
                    dept(5, Some(2), "Backend Group", "BE", 2, "Backend Lead", "010-22222222", "be@example.com", vec![]),
                ],
            ),
            dept(3, Some(1), "HR Department", "HR", 2, "HRD", "010-33333333", "hr@example.com", vec![]),
        ],
    )]
}

fn seed_dict_types() -> Vec<DictType> {
    let mk = |id, name: &str, code: &str, description: &str| DictType {
        id,
        name: name.to_string(),
        code: code.to_string(),
        status: Status::Active,
        description: Some(description.to_string()),
        create_time: ts("2024-01-01 10:00:00"),
    };
    vec![
        mk(1, "User Status", "userStatus", "User account status"),
        mk(2, "Gender", "gender", "User gender"),
        mk(3, "Order Status", "orderStatus", "Order processing status"),
    ]
}

fn seed_dict_items() -> Vec<DictItem> {
    let mk = |id, dict_code: &str, label: &str, value: &str, sort, tag_type: &str| DictItem {
        id,
        dict_code: dict_code.to_string(),
        label: label.to_string(),
        value: value.to_string(),
        sort,
        status: Status::Active,
        tag_type: (!tag_type.is_empty()).then(|| tag_type.to_string()),
    };
    vec![
        mk(1, "userStatus", "Enabled", "active", 1, "success"),
        mk(2, "userStatus", "Disabled", "inactive", 2, "danger"),
        mk(3, "gender", "Male", "1", 1, ""),
        mk(4, "gender", "Female", "2", 2, "success"),
        mk(5, "gender", "Unknown", "0", 3, "info"),
        mk(6, "orderStatus", "Pending", "pending", 1, "warning"),
        mk(7, "orderStatus", "Paid", "paid", 2, "success"),
        mk(8, "orderStatus", "Shipped", "shipped", 3, "primary"),
        mk(9, "orderStatus", "Completed", "completed", 4, "success"),
        mk(10, "orderStatus", "Cancelled", "cancelled", 5, "info"),
    ]
}

fn seed_files() -> Vec<FileRecord> {
    let mk = |id: &str, name: &str, url: &str, content_type: &str, size: u64, time: &str| FileRecord {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        content_type: content_type.to_string(),
        size,
        create_time: ts(time),
    };
    vec![
        mk("1", "element-plus-logo.svg", "https://element-plus.org/images/element-plus-logo.svg", "image/svg+xml", 1024 * 20, "2023-05-20 12:00:00"),
        mk("2", "test.docx", "https://static.shanhuxueyuan.com/test.docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document", 1024 * 15, "2023-05-21 09:30:00"),
        mk("3", "test.xlsx", "https://static.shanhuxueyuan.com/test.xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet", 1024 * 12, "2023-05-22 14:15:00"),
        mk("4", "test.pdf", "https://static.shanhuxueyuan.com/test.pdf", "application/pdf", 1024 * 500, "2023-05-23 16:45:00"),
        mk("5", "test.pptx", "https://static.shanhuxueyuan.com/test.pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation", 1024 * 1024 * 2, "2023-05-24 10:20:00"),
        mk("6", "moby-dick.epub", "https://s3.amazonaws.com/moby-dick/moby-dick.epub", "application/epub+zip", 1024 * 800, "2023-05-25 11:10:00"),
        mk("7", "roadmap.xmind", "https://raw.githubusercontent.com/xmindltd/xmind-sdk-js/master/demo/workbook.xmind", "application/vnd.xmind.workbook", 1024 * 200, "2023-05-26 09:00:00"),
    ]
}

/// 生成确定性的日志样本，便于测试分页和过滤
fn seed_logs() -> Vec<AuditLog> {
    const MODULES: [&str; 4] = [
        "User Management",
        "Role Management",
        "System Settings",
        "Permission Management",
    ];
    const ACTIONS: [&str; 5] = ["Login", "Logout", "Create", "Update", "Delete"];
    const USERNAMES: [&str; 4] = ["admin", "user1", "operator", "auditor"];

    let base = ts("2025-01-22 12:00:00");
    (0..60)
        .map(|i| {
            let module = MODULES[i % MODULES.len()];
            let action = ACTIONS[i % ACTIONS.len()];
            AuditLog {
                id: (i + 1) as i64,
                username: USERNAMES[i % USERNAMES.len()].to_string(),
                module: module.to_string(),
                action: action.to_string(),
                ip: format!("192.168.1.{}", (i % 254) + 1),
                status: if i % 7 == 0 { LogStatus::Fail } else { LogStatus::Success },
                create_time: base - Duration::hours(i as i64),
                details: format!("{action} via {module}"),
            }
        })
        .collect()
}

fn seed_notices() -> Vec<Notice> {
    vec![
        Notice {
            id: "1".to_string(),
            kind: NoticeKind::Message,
            title: "您收到了一封新邮件".to_string(),
            description: "来自系统管理员的系统通知".to_string(),
            datetime: ts("2025-01-22 10:00:00"),
            read: false,
            avatar: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=admin".to_string()),
            tag: None,
        },
        Notice {
            id: "2".to_string(),
            kind: NoticeKind::Message,
            title: "用户 User1 申请更改密码".to_string(),
            description: "请及时处理用户的密码重置请求".to_string(),
            datetime: ts("2025-01-22 09:30:00"),
            read: false,
            avatar: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=user1".to_string()),
            tag: None,
        },
        Notice {
            id: "3".to_string(),
            kind: NoticeKind::Task,
            title: "完成本月报表统计".to_string(),
            description: "任务截止时间：2025-01-31".to_string(),
            datetime: ts("2025-01-20 14:00:00"),
            read: false,
            avatar: None,
            tag: Some(NoticeTag { kind: "danger".to_string(), text: "紧急".to_string() }),
        },
        Notice {
            id: "4".to_string(),
            kind: NoticeKind::Task,
            title: "修复生产环境 Bug #1024".to_string(),
            description: "指派人：CTO".to_string(),
            datetime: ts("2025-01-21 16:00:00"),
            read: false,
            avatar: None,
            tag: Some(NoticeTag { kind: "primary".to_string(), text: "进行中".to_string() }),
        },
        Notice {
            id: "5".to_string(),
            kind: NoticeKind::Todo,
            title: "代码审查 (Code Review)".to_string(),
            description: "PR #123 需要您的审查".to_string(),
            datetime: ts("2025-01-22 08:00:00"),
            read: false,
            avatar: None,
            tag: None,
        },
    ]
}

fn seed_dashboard() -> DashboardData {
    DashboardData {
        total_users: 12480,
        total_orders: 8924,
        total_revenue: 256890.0,
        avg_conversion: 68.5,
        weekly_visits: vec![820, 932, 901, 934, 1290, 1330, 1320],
        user_distribution: vec![
            DistributionSlice { value: 1048, name: "Mobile".to_string() },
            DistributionSlice { value: 735, name: "PC".to_string() },
            DistributionSlice { value: 580, name: "Tablet".to_string() },
            DistributionSlice { value: 300, name: "Other".to_string() },
        ],
    }
}

fn seed_transactions() -> Vec<Transaction> {
    let mk = |id: &str, user: &str, amount, status, time: &str| Transaction {
        id: id.to_string(),
        user: user.to_string(),
        amount,
        status,
        time: ts(time),
    };
    vec![
        mk("ORD001", "User A", 299.0, TransactionStatus::Success, "2025-01-17 10:30:00"),
        mk("ORD002", "User B", 159.0, TransactionStatus::Pending, "2025-01-17 10:25:00"),
        mk("ORD003", "User C", 899.0, TransactionStatus::Success, "2025-01-17 10:20:00"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_internally_consistent() {
        let data = MockData::seed();

        // every role permission id resolves
        for role in &data.roles {
            for id in &role.permission_ids {
                assert!(data.permission_by_id(*id).is_some(), "dangling permission {id}");
            }
        }
        // every user-role edge resolves
        for ur in &data.user_roles {
            assert!(data.user_by_id(ur.user_id).is_some());
            assert!(data.roles.iter().any(|r| r.id == ur.role_id));
        }
        // every permission parent resolves
        for p in &data.permissions {
            if let Some(parent) = p.parent_id {
                assert!(data.permission_by_id(parent).is_some());
            }
        }
    }

    #[test]
    fn admin_aggregates_all_permissions() {
        let data = MockData::seed();
        let perms = data.aggregated_permissions(1);
        assert_eq!(perms.len(), data.permissions.len());
    }

    #[test]
    fn basic_user_gets_dashboard_and_user_view() {
        let data = MockData::seed();
        let codes: Vec<String> = data
            .aggregated_permissions(2)
            .iter()
            .map(|p| p.code.clone())
            .collect();
        assert_eq!(codes.len(), 2);
        assert!(codes.contains(&"dashboard".to_string()));
        assert!(codes.contains(&"user:view".to_string()));
    }
}
