// ==========================================
// 装机配置引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod build;
pub mod catalog;
pub mod export;
pub mod signals;
pub mod types;

// 重导出核心类型
pub use build::{
    AddOutcome, Build, ConflictDecision, ConflictResolution, PlacedItem, PlacementId,
    SlotConflict,
};
pub use catalog::{Catalog, CatalogItem};
pub use export::{BuildExport, BuildStats, UNKNOWN_PROCESSOR};
pub use signals::{
    BottleneckEstimate, BuildSignals, CompatibilityVerdict, NotApplicableReason, PowerDraw,
};
pub use types::{BottleneckBand, Category, CompatibilityStatus, LimitingComponent};
