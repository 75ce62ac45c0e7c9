// heron-client/src/storage.rs
// Token 存储 - JSON 文件持久化

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const TOKEN_FILE: &str = "token.json";

/// 持久化的 Token 记录
///
/// Only the bearer token survives a restart; the user profile is
/// refetched on every session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl StoredToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            saved_at: Some(chrono::Utc::now()),
        }
    }
}

/// Token 存储
#[derive(Debug, Clone)]
pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    /// 创建 Token 存储（文件放在 `<base>/heron/token.json`）
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let path = base_path.into().join("heron").join(TOKEN_FILE);
        Self { path }
    }

    /// 确保目录存在
    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// 保存 token
    pub fn save(&self, token: &str) -> std::io::Result<()> {
        self.ensure_dir()?;
        let record = StoredToken::new(token);
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&self.path, json)
    }

    /// 加载 token
    pub fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        let record: StoredToken = serde_json::from_str(&json).ok()?;
        Some(record.token)
    }

    /// 检查 token 是否存在
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// 删除 token
    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// 获取路径
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TokenStorage::new(dir.path());

        assert!(!storage.exists());
        assert_eq!(storage.load(), None);

        storage.save("mock-token-admin-1700000000").unwrap();
        assert!(storage.exists());

        // byte-identical after a fresh instance, as after a reload
        let fresh = TokenStorage::new(dir.path());
        assert_eq!(fresh.load().as_deref(), Some("mock-token-admin-1700000000"));
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TokenStorage::new(dir.path());

        storage.delete().unwrap();
        storage.save("t").unwrap();
        storage.delete().unwrap();
        storage.delete().unwrap();
        assert!(!storage.exists());
    }
}
