//! 元数据键值表
//!
//! 题目头部与小题头部的 `key: value` 行都解析为 [`MetadataMap`]。
//! 保留出现顺序，同名键后者覆盖前者；未识别的键原样保留但不使用。

/// 题目级元数据中可识别的键
pub mod keys {
    pub const ID: &str = "id";
    pub const LANGUAGE: &str = "language";
    pub const CATEGORY: &str = "category";
    pub const COUNTRY: &str = "country";
    pub const TYPE: &str = "type";
    pub const AI_TEMPLATE_ID: &str = "ai_template_id";
    pub const MAPPED_ID: &str = "mapped_id";
    pub const DESCRIPTION: &str = "description";
}

/// 有序、键唯一的元数据表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataMap {
    entries: Vec<(String, String)>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入键值，已存在的键在原位置被覆盖
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 获取非空值，空字符串视为未设置
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut map = MetadataMap::new();
        map.insert("id", "1");
        map.insert("language", "en");
        map.insert("id", "2");

        assert_eq!(map.iter().count(), 2);
        assert_eq!(map.get("id"), Some("2"));
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["id", "language"]);
    }

    #[test]
    fn test_get_non_empty() {
        let mut map = MetadataMap::new();
        map.insert("type", "");
        assert_eq!(map.get("type"), Some(""));
        assert_eq!(map.get_non_empty("type"), None);
    }
}
