// ==========================================
// 装机配置引擎 - 核心库
// ==========================================
// 职责: 装机单模型、槽位规则、冲突决策、兼容性/瓶颈/功耗信号
// 系统定位: 展示层与目录存储均为外部协作方
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 目录层 - 外部数据
pub mod catalog;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 引擎参数
pub mod config;

// 数据库基础设施（配置存储）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{BottleneckBand, Category, CompatibilityStatus, LimitingComponent};

// 领域实体
pub use domain::{
    AddOutcome, Build, BuildExport, BuildSignals, BottleneckEstimate, Catalog, CatalogItem,
    ConflictDecision, ConflictResolution, PlacedItem, PlacementId, SlotConflict,
};

// 引擎
pub use engine::{BuildConfigurator, BuildSnapshot, CatalogStatus, EngineError, SignalEngine};

// 配置
pub use config::{CompatibilityPolicy, ConfigManager, EngineConfig};

// 目录
pub use catalog::{CatalogProvider, JsonFileCatalogProvider, StaticCatalogProvider};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "装机配置引擎";
