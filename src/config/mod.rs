// ==========================================
// 装机配置引擎 - 配置层
// ==========================================
// 职责: 引擎参数管理,支持 config_kv 覆写
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod engine_config;
pub mod engine_config_reader;
pub mod error;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use engine_config::{defaults, CompatibilityPolicy, EngineConfig};
pub use engine_config_reader::EngineConfigReader;
pub use error::{ConfigError, ConfigResult};
