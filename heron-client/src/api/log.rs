//! 操作日志接口

use shared::Page;
use shared::models::{AuditLog, LogCreate, LogQuery};

use crate::ClientResult;
use crate::http::HttpClient;

impl HttpClient {
    /// 分页查询日志，支持用户名/模块/状态过滤
    pub async fn list_logs(&self, query: &LogQuery) -> ClientResult<Page<AuditLog>> {
        self.get_with_query("/log/list", query).await
    }

    /// 记录一条操作日志
    pub async fn create_log(&self, log: &LogCreate) -> ClientResult<()> {
        self.post_unit("/log/create", log).await
    }
}
