//! Wire models shared between client and server

pub mod dashboard;
pub mod department;
pub mod dict;
pub mod file;
pub mod log;
pub mod menu;
pub mod notice;
pub mod permission;
pub mod role;
pub mod user;

pub use dashboard::{DashboardData, DistributionSlice, Transaction, TransactionStatus};
pub use department::{Department, DepartmentCreate, DepartmentUpdate, flatten_departments};
pub use dict::{DictItem, DictItemUpsert, DictType, DictTypeUpsert};
pub use file::FileRecord;
pub use log::{AuditLog, LogCreate, LogQuery, LogStatus};
pub use menu::Menu;
pub use notice::{Notice, NoticeKind, NoticeTag};
pub use permission::{
    Permission, PermissionCreate, PermissionKind, PermissionTreeNode, PermissionUpdate,
    UserPermissions,
};
pub use role::{
    AssignPermissionsRequest, AssignRolesRequest, Role, RoleCreate, RoleUpdate, UserRole,
};
pub use user::{
    ChangePasswordRequest, LoginRequest, LoginResponse, ProfileUpdate, UserCreate, UserInfo,
    UserRecord, UserUpdate,
};

use serde::{Deserialize, Serialize};

/// 启用/停用状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl Status {
    pub fn is_active(self) -> bool {
        matches!(self, Status::Active)
    }
}
