// ==========================================
// 装机配置引擎 - 目录层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 目录层错误类型
#[derive(Error, Debug)]
pub enum CatalogError {
    // ===== 拉取错误 (可重试) =====
    #[error("目录拉取失败: {0}")]
    Transport(String),

    #[error("目录文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    // ===== 载荷错误 (不重试) =====
    #[error("目录 JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("目录载荷格式错误: {0}")]
    Malformed(String),
}

impl CatalogError {
    /// 是否值得重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Transport(_) | CatalogError::Io(_))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
