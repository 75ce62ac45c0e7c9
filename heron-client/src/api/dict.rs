//! 数据字典接口

use shared::models::{DictItem, DictItemUpsert, DictType, DictTypeUpsert};
use shared::Page;

use crate::ClientResult;
use crate::http::HttpClient;

impl HttpClient {
    /// 获取字典类型列表（分页外壳，总量很小）
    pub async fn list_dict_types(&self) -> ClientResult<Page<DictType>> {
        self.get("/dict/type/list").await
    }

    /// 按类型码获取字典项
    pub async fn list_dict_items(&self, type_code: &str) -> ClientResult<Vec<DictItem>> {
        self.get_with_query("/dict/item/list", &[("typeCode", type_code)]).await
    }

    /// 新增字典类型
    pub async fn add_dict_type(&self, dict_type: &DictTypeUpsert) -> ClientResult<DictType> {
        self.post("/dict/type", dict_type).await
    }

    /// 更新字典类型
    pub async fn update_dict_type(&self, dict_type: &DictTypeUpsert) -> ClientResult<DictType> {
        self.put("/dict/type", dict_type).await
    }

    /// 删除字典类型
    pub async fn delete_dict_type(&self, id: i64) -> ClientResult<()> {
        self.delete_unit(&format!("/dict/type/{id}")).await
    }

    /// 新增字典项
    pub async fn add_dict_item(&self, item: &DictItemUpsert) -> ClientResult<DictItem> {
        self.post("/dict/item", item).await
    }

    /// 更新字典项
    pub async fn update_dict_item(&self, item: &DictItemUpsert) -> ClientResult<DictItem> {
        self.put("/dict/item", item).await
    }

    /// 删除字典项
    pub async fn delete_dict_item(&self, id: i64) -> ClientResult<()> {
        self.delete_unit(&format!("/dict/item/{id}")).await
    }
}
