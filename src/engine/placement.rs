// ==========================================
// 装机配置引擎 - 放置状态
// ==========================================
// 职责: 维护装机单聚合,执行单槽位规则
// 红线:
// - 单槽位类别同时最多一个放置
// - 冲突时不做任何修改,交由调用方决策
// - 永不静默覆盖;替换必须显式 (先移除后放置)
// ==========================================

use crate::domain::build::{
    AddOutcome, Build, ConflictResolution, PlacedItem, PlacementId, SlotConflict,
};
use crate::domain::catalog::CatalogItem;
use crate::domain::types::Category;

// ==========================================
// PlacementState - 放置状态
// ==========================================
#[derive(Debug, Clone)]
pub struct PlacementState {
    build: Build,
    next_id: u64,
    single_slot_categories: Vec<Category>,
}

impl PlacementState {
    /// 构造函数
    ///
    /// # 参数
    /// - `single_slot_categories`: 单槽位类别集合
    pub fn new(single_slot_categories: Vec<Category>) -> Self {
        Self {
            build: Build::new(),
            next_id: 1,
            single_slot_categories,
        }
    }

    pub fn is_single_slot(&self, category: &Category) -> bool {
        self.single_slot_categories.contains(category)
    }

    /// 放置组件
    ///
    /// # 返回
    /// - `Placed`: 已追加,分配新的放置ID
    /// - `Conflict`: 单槽位已被占用,装机单未修改
    pub fn add(&mut self, item: CatalogItem) -> AddOutcome {
        if let Some(existing) = self.single_slot_occupant(&item.category) {
            tracing::debug!(
                category = %item.category,
                existing = %existing.placement_id,
                incoming = %item.id,
                "单槽位冲突"
            );
            return AddOutcome::Conflict(SlotConflict {
                existing: existing.clone(),
                incoming: item,
            });
        }

        let placement_id = self.place(item);
        AddOutcome::Placed { placement_id }
    }

    /// 移除放置记录（幂等）
    ///
    /// # 返回
    /// - Some: 被移除的记录
    /// - None: 不存在,无操作
    pub fn remove(&mut self, placement_id: PlacementId) -> Option<PlacedItem> {
        let removed = self.build.take(placement_id);
        match &removed {
            Some(placed) => tracing::debug!(
                placement_id = %placement_id,
                item_id = %placed.item.id,
                "组件已移除"
            ),
            None => tracing::debug!(placement_id = %placement_id, "移除目标不存在，忽略"),
        }
        removed
    }

    /// 原子替换: 移除 existing 后放置 incoming
    ///
    /// 若 incoming 的单槽位已被 existing 以外的放置占用,则不做任何修改并返回新的冲突
    pub fn replace(&mut self, existing: PlacementId, incoming: CatalogItem) -> ConflictResolution {
        if let Some(occupant) = self.single_slot_occupant(&incoming.category) {
            if occupant.placement_id != existing {
                return ConflictResolution::Conflict(SlotConflict {
                    existing: occupant.clone(),
                    incoming,
                });
            }
        }

        let removed = self.build.take(existing).map(|p| p.placement_id);
        let placed = self.place(incoming);
        tracing::debug!(?removed, placed = %placed, "单槽位已替换");

        ConflictResolution::Replaced { removed, placed }
    }

    /// 清空装机单（放置ID计数不重置）
    pub fn clear(&mut self) {
        self.build.clear();
    }

    /// 当前装机单只读快照
    pub fn current_build(&self) -> &Build {
        &self.build
    }

    fn single_slot_occupant(&self, category: &Category) -> Option<&PlacedItem> {
        if !self.is_single_slot(category) {
            return None;
        }
        self.build.occupant(category)
    }

    fn place(&mut self, item: CatalogItem) -> PlacementId {
        let placement_id = PlacementId(self.next_id);
        self.next_id += 1;

        tracing::debug!(
            placement_id = %placement_id,
            item_id = %item.id,
            category = %item.category,
            "组件已放置"
        );
        self.build.push(PlacedItem { placement_id, item });
        placement_id
    }
}
