// ==========================================
// 装机配置引擎 - 目录层
// ==========================================
// 职责: 外部目录拉取、容错解析,生成会话目录
// 支持: 内存载荷, JSON 文件
// ==========================================

pub mod error;
pub mod loader;
pub mod parser;
pub mod provider;

// 重导出核心类型
pub use error::{CatalogError, CatalogResult};
pub use loader::CatalogLoader;
pub use parser::{CatalogParser, ParseReport};
pub use provider::{sample_payload, CatalogProvider, JsonFileCatalogProvider, StaticCatalogProvider};
