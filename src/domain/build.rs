// ==========================================
// 装机配置引擎 - 装机单领域模型
// ==========================================
// 职责: 放置记录、装机单聚合、放置结果与冲突决策
// 红线: 不含槽位规则 (由 engine::placement 负责)
// ==========================================

use crate::domain::catalog::CatalogItem;
use crate::domain::types::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// PlacementId - 放置ID
// ==========================================
// 每次放置事件分配一次,单调递增,永不复用
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(pub u64);

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

// ==========================================
// PlacedItem - 放置记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub placement_id: PlacementId, // 放置ID
    pub item: CatalogItem,         // 被放置的目录条目 (按值持有)
}

impl PlacedItem {
    pub fn category(&self) -> &Category {
        &self.item.category
    }
}

// ==========================================
// Build - 装机单聚合
// ==========================================
// 插入顺序即展示顺序,无其他语义
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Build {
    items: Vec<PlacedItem>,
}

impl Build {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 指定类别的放置数量
    pub fn count(&self, category: &Category) -> usize {
        self.items.iter().filter(|p| p.category() == category).count()
    }

    /// 指定类别的第一个放置记录
    pub fn occupant(&self, category: &Category) -> Option<&PlacedItem> {
        self.items.iter().find(|p| p.category() == category)
    }

    pub fn contains(&self, placement_id: PlacementId) -> bool {
        self.items.iter().any(|p| p.placement_id == placement_id)
    }

    pub(crate) fn push(&mut self, placed: PlacedItem) {
        self.items.push(placed);
    }

    pub(crate) fn take(&mut self, placement_id: PlacementId) -> Option<PlacedItem> {
        let index = self
            .items
            .iter()
            .position(|p| p.placement_id == placement_id)?;
        Some(self.items.remove(index))
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

// ==========================================
// SlotConflict - 单槽位冲突
// ==========================================
// 决策点而非错误: 由调用方决定替换或放弃
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConflict {
    pub existing: PlacedItem,  // 当前占用者
    pub incoming: CatalogItem, // 试图放入的条目
}

impl SlotConflict {
    pub fn category(&self) -> &Category {
        &self.incoming.category
    }
}

// ==========================================
// AddOutcome - 放置结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddOutcome {
    Placed { placement_id: PlacementId },
    Conflict(SlotConflict),
}

impl AddOutcome {
    pub fn placement_id(&self) -> Option<PlacementId> {
        match self {
            AddOutcome::Placed { placement_id } => Some(*placement_id),
            AddOutcome::Conflict(_) => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, AddOutcome::Conflict(_))
    }
}

// ==========================================
// ConflictDecision - 冲突决策
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictDecision {
    Replace, // 移除旧占用者并放入新条目
    Abandon, // 放弃,装机单保持不变
}

// ==========================================
// ConflictResolution - 冲突处理结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resolution", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictResolution {
    /// 已替换
    Replaced {
        removed: Option<PlacementId>,
        placed: PlacementId,
    },
    /// 已放弃
    Abandoned,
    /// 槽位已被其他放置占用,未做任何修改
    Conflict(SlotConflict),
}
