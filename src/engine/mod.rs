// ==========================================
// 装机配置引擎 - 引擎层
// ==========================================
// 职责: 放置规则、冲突决策、派生信号计算
// 红线: 预期情况 (冲突/幂等移除/瓶颈不适用) 以返回值表达,不报错
// ==========================================

pub mod configurator;
pub mod error;
pub mod events;
pub mod placement;
pub mod signals;

// 重导出核心引擎
pub use configurator::{BuildConfigurator, BuildSnapshot, CatalogStatus};
pub use error::{EngineError, EngineResult};
pub use events::{
    BuildEvent, BuildEventPublisher, BuildEventType, NoOpEventPublisher, OptionalEventPublisher,
};
pub use placement::PlacementState;
pub use signals::SignalEngine;
