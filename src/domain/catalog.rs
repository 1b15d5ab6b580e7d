// ==========================================
// 装机配置引擎 - 组件目录领域模型
// ==========================================
// 职责: 目录条目 (只读) 与会话内目录集合
// 红线: 引擎不修改目录条目
// ==========================================

use crate::domain::types::Category;
use serde::{Deserialize, Serialize};

// ==========================================
// CatalogItem - 目录条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,                 // 条目ID (唯一)
    pub category: Category,         // 组件类别
    pub name: String,               // 显示名称
    #[serde(default)]
    pub description: String,        // 描述 (仅展示)
    #[serde(default)]
    pub power_draw: f64,            // 功耗 (W, >= 0)
    #[serde(default)]
    pub performance_score: f64,     // 性能评分 (仅 CPU/GPU 有意义)
}

impl CatalogItem {
    pub fn new(id: &str, category: Category, name: &str) -> Self {
        Self {
            id: id.to_string(),
            category,
            name: name.to_string(),
            description: String::new(),
            power_draw: 0.0,
            performance_score: 0.0,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_power_draw(mut self, watts: f64) -> Self {
        self.power_draw = watts;
        self
    }

    pub fn with_performance_score(mut self, score: f64) -> Self {
        self.performance_score = score;
        self
    }
}

// ==========================================
// Catalog - 会话目录
// ==========================================
// 会话开始时一次性载入,之后只读
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// 构造目录（调用方保证 id 唯一）
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// 按 ID 查找条目
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// 按类别过滤 (None 表示全部)
    pub fn filter(&self, category: Option<&Category>) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| category.map_or(true, |c| &item.category == c))
            .collect()
    }

    /// 目录中出现过的类别 (按首次出现顺序)
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for item in &self.items {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new("c1", Category::Processor, "CPU A"),
            CatalogItem::new("r1", Category::Memory, "RAM A"),
            CatalogItem::new("r2", Category::Memory, "RAM B"),
        ])
    }

    #[test]
    fn test_get_by_id() {
        let catalog = create_test_catalog();
        assert_eq!(catalog.get("r2").map(|i| i.name.as_str()), Some("RAM B"));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = create_test_catalog();
        assert_eq!(catalog.filter(None).len(), 3);
        assert_eq!(catalog.filter(Some(&Category::Memory)).len(), 2);
        assert!(catalog.filter(Some(&Category::PowerSupply)).is_empty());
    }

    #[test]
    fn test_categories_in_order() {
        let catalog = create_test_catalog();
        assert_eq!(catalog.categories(), vec![Category::Processor, Category::Memory]);
    }
}
