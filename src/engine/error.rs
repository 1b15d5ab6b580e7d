// ==========================================
// 装机配置引擎 - 引擎层错误类型
// ==========================================
// 说明: 冲突、幂等移除、瓶颈不适用均为返回值,不属于错误
// 工具: thiserror 派生宏
// ==========================================

use crate::catalog::error::CatalogError;
use crate::config::error::ConfigError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("目录尚未加载，操作被拒绝")]
    CatalogNotReady,

    #[error("目录中不存在该组件: {0}")]
    UnknownItem(String),

    #[error("当前没有待决策的槽位冲突")]
    NoPendingConflict,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type EngineResult<T> = Result<T, EngineError>;
