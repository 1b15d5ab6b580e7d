// ==========================================
// 装机配置引擎 - 会话引擎
// ==========================================
// 职责: 每个编辑会话一个实例,独占装机单
// 流程: 目录加载 → 放置/移除 → 冲突决策 → 派生信号重算
// 红线:
// - 无全局状态,展示层持有实例引用
// - 目录就绪前拒绝变更 (不静默丢弃)
// - 冲突由 resolve_conflict 显式决策,无默认/超时
// ==========================================

use crate::catalog::{CatalogLoader, CatalogProvider};
use crate::config::EngineConfig;
use crate::domain::build::{
    AddOutcome, Build, ConflictDecision, ConflictResolution, PlacedItem, PlacementId,
    SlotConflict,
};
use crate::domain::catalog::Catalog;
use crate::domain::export::BuildExport;
use crate::domain::signals::BuildSignals;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::events::{
    BuildEvent, BuildEventPublisher, BuildEventType, OptionalEventPublisher,
};
use crate::engine::placement::PlacementState;
use crate::engine::signals::SignalEngine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ==========================================
// CatalogStatus - 目录状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogStatus {
    /// 拉取中,拒绝变更
    Pending,
    /// 已就绪
    Ready { item_count: usize },
    /// 不可用或为空,以空目录降级运行 (展示层负责提示用户)
    Degraded { reason: String },
}

// ==========================================
// BuildSnapshot - 展示层快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSnapshot {
    pub items: Vec<PlacedItem>,
    pub signals: BuildSignals,
    pub pending_conflict: Option<SlotConflict>,
    pub catalog_status: CatalogStatus,
}

// ==========================================
// BuildConfigurator - 会话引擎
// ==========================================
pub struct BuildConfigurator {
    config: EngineConfig,
    catalog: Option<Catalog>,
    catalog_status: CatalogStatus,
    placement: PlacementState,
    signals: SignalEngine,
    pending_conflict: Option<SlotConflict>,
    publisher: OptionalEventPublisher,
}

impl BuildConfigurator {
    /// 构造函数 (配置先校验)
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;

        Ok(Self {
            placement: PlacementState::new(config.single_slot_categories.clone()),
            signals: SignalEngine::new(&config),
            config,
            catalog: None,
            catalog_status: CatalogStatus::Pending,
            pending_conflict: None,
            publisher: OptionalEventPublisher::none(),
        })
    }

    /// 设置事件发布者
    pub fn with_publisher(mut self, publisher: Arc<dyn BuildEventPublisher>) -> Self {
        self.publisher = OptionalEventPublisher::with_publisher(publisher);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ==========================================
    // 目录
    // ==========================================

    /// 从提供方加载目录 (会话开始时调用一次)
    ///
    /// # 返回
    /// - Ok(status): 目录已安装 (为空时为 Degraded)
    /// - Err: 拉取最终失败;会话已切换为空目录降级运行,调用方负责提示用户
    pub async fn load_catalog(&mut self, provider: &dyn CatalogProvider) -> EngineResult<CatalogStatus> {
        let loader = CatalogLoader::from_config(&self.config);

        match loader.load(provider).await {
            Ok((catalog, _report)) => Ok(self.install_catalog(catalog)),
            Err(e) => {
                self.enter_degraded(format!("目录拉取失败: {}", e));
                Err(e.into())
            }
        }
    }

    /// 直接安装目录
    pub fn install_catalog(&mut self, catalog: Catalog) -> CatalogStatus {
        if catalog.is_empty() {
            self.enter_degraded("目录为空".to_string());
        } else {
            tracing::info!(item_count = catalog.len(), "目录已就绪");
            self.catalog_status = CatalogStatus::Ready {
                item_count: catalog.len(),
            };
            self.catalog = Some(catalog);
            self.emit(BuildEventType::CatalogLoaded, None);
        }
        self.catalog_status.clone()
    }

    fn enter_degraded(&mut self, reason: String) {
        tracing::warn!(reason = %reason, "目录不可用，以空目录降级运行");
        self.catalog = Some(Catalog::empty());
        self.catalog_status = CatalogStatus::Degraded { reason };
        self.emit(BuildEventType::CatalogDegraded, None);
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog_status
    }

    fn ready_catalog(&self) -> EngineResult<&Catalog> {
        self.catalog.as_ref().ok_or(EngineError::CatalogNotReady)
    }

    // ==========================================
    // 变更操作
    // ==========================================

    /// 按目录 ID 放置组件
    ///
    /// # 返回
    /// - Ok(Placed): 已放置
    /// - Ok(Conflict): 单槽位冲突,装机单未修改,冲突记录为待决策 (覆盖旧的待决策冲突)
    /// - Err(UnknownItem): 目录中无此 ID (降级模式下所有放置都走这里)
    pub fn add(&mut self, item_id: &str) -> EngineResult<AddOutcome> {
        let item = self
            .ready_catalog()?
            .get(item_id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownItem(item_id.to_string()))?;
        let category = item.category.clone();

        let outcome = self.placement.add(item);
        match &outcome {
            AddOutcome::Placed { placement_id } => {
                self.emit(BuildEventType::ItemPlaced, Some(*placement_id));
            }
            AddOutcome::Conflict(conflict) => {
                if let Some(previous) = self.pending_conflict.replace(conflict.clone()) {
                    tracing::debug!(
                        superseded = %previous.incoming.id,
                        "新的冲突覆盖待决策冲突"
                    );
                }
                self.publisher.publish(
                    BuildEvent::new(BuildEventType::ConflictRaised, self.placement.current_build().len())
                        .with_placement(conflict.existing.placement_id)
                        .with_category(category),
                );
            }
        }
        Ok(outcome)
    }

    /// 移除放置 (幂等;不存在时返回 Ok(None))
    pub fn remove(&mut self, placement_id: PlacementId) -> EngineResult<Option<PlacedItem>> {
        self.ready_catalog()?;

        let removed = self.placement.remove(placement_id);
        if removed.is_some() {
            self.emit(BuildEventType::ItemRemoved, Some(placement_id));
        }
        Ok(removed)
    }

    /// 处理待决策冲突
    ///
    /// - Replace: 同一调用内先移除后放置,外部观察不到空槽状态
    /// - Abandon: 装机单不变
    pub fn resolve_conflict(&mut self, decision: ConflictDecision) -> EngineResult<ConflictResolution> {
        self.ready_catalog()?;
        let conflict = self
            .pending_conflict
            .take()
            .ok_or(EngineError::NoPendingConflict)?;

        let resolution = match decision {
            ConflictDecision::Abandon => {
                tracing::debug!(incoming = %conflict.incoming.id, "冲突已放弃");
                self.emit(BuildEventType::ConflictAbandoned, None);
                ConflictResolution::Abandoned
            }
            ConflictDecision::Replace => {
                let resolution = self
                    .placement
                    .replace(conflict.existing.placement_id, conflict.incoming);
                match &resolution {
                    ConflictResolution::Replaced { placed, .. } => {
                        self.emit(BuildEventType::ItemReplaced, Some(*placed));
                    }
                    ConflictResolution::Conflict(fresh) => {
                        tracing::debug!(
                            occupant = %fresh.existing.placement_id,
                            "槽位已被其他放置占用，重新发起冲突"
                        );
                        self.pending_conflict = Some(fresh.clone());
                        self.emit(BuildEventType::ConflictRaised, Some(fresh.existing.placement_id));
                    }
                    ConflictResolution::Abandoned => {}
                }
                resolution
            }
        };

        Ok(resolution)
    }

    /// 清空装机单,同时丢弃待决策冲突
    pub fn clear(&mut self) -> EngineResult<()> {
        self.ready_catalog()?;
        self.placement.clear();
        self.pending_conflict = None;
        self.emit(BuildEventType::BuildCleared, None);
        Ok(())
    }

    // ==========================================
    // 只读视图
    // ==========================================

    pub fn current_build(&self) -> &Build {
        self.placement.current_build()
    }

    pub fn pending_conflict(&self) -> Option<&SlotConflict> {
        self.pending_conflict.as_ref()
    }

    /// 派生信号 (每次按当前装机单重新计算)
    pub fn signals(&self) -> BuildSignals {
        self.signals.compute(self.placement.current_build())
    }

    /// 展示层快照
    pub fn snapshot(&self) -> BuildSnapshot {
        BuildSnapshot {
            items: self.current_build().items().to_vec(),
            signals: self.signals(),
            pending_conflict: self.pending_conflict.clone(),
            catalog_status: self.catalog_status.clone(),
        }
    }

    /// 导出记录 (交给外部持久化协作方)
    pub fn export(&self) -> BuildExport {
        let build = self.placement.current_build();
        let total_power_w = self.signals.power_draw(build).total_w;
        BuildExport::from_build(build, total_power_w)
    }

    fn emit(&self, event_type: BuildEventType, placement_id: Option<PlacementId>) {
        let mut event = BuildEvent::new(event_type, self.placement.current_build().len());
        if let Some(id) = placement_id {
            event = event.with_placement(id);
        }
        self.publisher.publish(event);
    }
}
