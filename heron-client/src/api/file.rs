//! 文件管理接口

use reqwest::multipart::{Form, Part};
use shared::models::FileRecord;

use crate::ClientResult;
use crate::http::HttpClient;

impl HttpClient {
    /// 获取文件列表
    pub async fn list_files(&self) -> ClientResult<Vec<FileRecord>> {
        self.get("/file/list").await
    }

    /// 上传文件（multipart/form-data）
    pub async fn upload_file(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> ClientResult<FileRecord> {
        let part = Part::bytes(content).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        self.post_multipart("/file/upload", form).await
    }

    /// 删除文件，服务端返回是否真正删除
    pub async fn delete_file(&self, id: &str) -> ClientResult<bool> {
        self.delete_with_query("/file/delete", &[("id", id)]).await
    }
}
