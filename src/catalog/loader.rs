// ==========================================
// 装机配置引擎 - 目录加载器
// ==========================================
// 职责: 拉取 (可重试) + 解析,产出会话目录
// 说明: 要么完整产出目录,要么失败;无部分完成状态
// ==========================================

use crate::catalog::error::CatalogResult;
use crate::catalog::parser::{CatalogParser, ParseReport};
use crate::catalog::provider::CatalogProvider;
use crate::config::EngineConfig;
use crate::domain::catalog::Catalog;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CatalogLoader {
    attempts: u32,
    retry_delay: Duration,
}

impl CatalogLoader {
    pub fn new(attempts: u32, retry_delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            retry_delay,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.catalog_fetch_attempts,
            Duration::from_millis(config.catalog_retry_delay_ms),
        )
    }

    /// 拉取并解析目录
    ///
    /// # 重试策略
    /// - 传输类错误按配置次数重试
    /// - 载荷格式错误立即返回
    pub async fn load(&self, provider: &dyn CatalogProvider) -> CatalogResult<(Catalog, ParseReport)> {
        let mut attempt = 1;

        let payload = loop {
            match provider.fetch().await {
                Ok(payload) => break payload,
                Err(e) if e.is_retryable() && attempt < self.attempts => {
                    tracing::warn!(
                        provider = provider.name(),
                        attempt,
                        max_attempts = self.attempts,
                        error = %e,
                        "目录拉取失败，准备重试"
                    );
                    attempt += 1;
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => {
                    tracing::error!(
                        provider = provider.name(),
                        attempt,
                        error = %e,
                        "目录拉取失败"
                    );
                    return Err(e);
                }
            }
        };

        let (catalog, report) = CatalogParser.parse(&payload)?;
        tracing::info!(
            provider = provider.name(),
            attempt,
            accepted = report.accepted,
            discarded = report.discarded,
            duplicates = report.duplicates,
            "目录加载完成"
        );

        Ok((catalog, report))
    }
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
