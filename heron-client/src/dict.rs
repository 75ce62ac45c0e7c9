//! 数据字典缓存
//!
//! Dictionary items are fetched once per type code and memoized for
//! the session. `clear_cache` drops a single entry after an edit.

use std::collections::HashMap;

use shared::models::DictItem;

use crate::ClientResult;
use crate::http::HttpClient;

#[derive(Debug, Default)]
pub struct DictionaryStore {
    cache: HashMap<String, Vec<DictItem>>,
}

impl DictionaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取字典项，优先走缓存
    pub async fn fetch_dict(
        &mut self,
        http: &HttpClient,
        type_code: &str,
    ) -> ClientResult<Vec<DictItem>> {
        if let Some(items) = self.cache.get(type_code) {
            return Ok(items.clone());
        }
        let items: Vec<DictItem> = http
            .get_with_query("/dict/item/list", &[("typeCode", type_code)])
            .await?;
        self.cache.insert(type_code.to_string(), items.clone());
        Ok(items)
    }

    /// 仅查缓存，未加载时返回空
    pub fn get_dict(&self, type_code: &str) -> &[DictItem] {
        self.cache.get(type_code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 查标签：value 命中返回 label，否则原样返回 value
    pub fn get_label<'a>(&'a self, type_code: &str, value: &'a str) -> &'a str {
        self.get_dict(type_code)
            .iter()
            .find(|item| item.value == value)
            .map(|item| item.label.as_str())
            .unwrap_or(value)
    }

    /// 清除某个类型的缓存（如编辑后）
    pub fn clear_cache(&mut self, type_code: &str) {
        self.cache.remove(type_code);
    }

    /// 清空全部缓存
    pub fn clear_all(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use shared::models::Status;

    use super::*;

    fn item(label: &str, value: &str) -> DictItem {
        DictItem {
            id: 1,
            dict_code: "userStatus".to_string(),
            label: label.to_string(),
            value: value.to_string(),
            sort: 0,
            status: Status::Active,
            tag_type: None,
        }
    }

    #[test]
    fn label_lookup_falls_back_to_value() {
        let mut store = DictionaryStore::new();
        store
            .cache
            .insert("userStatus".to_string(), vec![item("启用", "active")]);

        assert_eq!(store.get_label("userStatus", "active"), "启用");
        assert_eq!(store.get_label("userStatus", "unknown"), "unknown");
        assert_eq!(store.get_label("missingType", "active"), "active");
    }

    #[test]
    fn clear_cache_drops_single_entry() {
        let mut store = DictionaryStore::new();
        store.cache.insert("a".to_string(), vec![item("x", "1")]);
        store.cache.insert("b".to_string(), vec![item("y", "2")]);

        store.clear_cache("a");
        assert!(store.get_dict("a").is_empty());
        assert_eq!(store.get_dict("b").len(), 1);
    }
}
