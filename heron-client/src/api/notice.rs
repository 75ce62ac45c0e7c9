//! 消息通知接口

use shared::models::Notice;

use crate::ClientResult;
use crate::http::HttpClient;

impl HttpClient {
    /// 获取通知列表
    pub async fn list_notices(&self) -> ClientResult<Vec<Notice>> {
        self.get("/notice/list").await
    }
}
