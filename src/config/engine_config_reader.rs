// ==========================================
// 装机配置引擎 - 引擎配置读取 Trait
// ==========================================
// 职责: 定义引擎所需的配置读取接口（不包含实现）
// 实现者: ConfigManager（从 config_kv 表读取）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::config::error::ConfigResult;
use crate::domain::types::Category;
use async_trait::async_trait;

#[async_trait]
pub trait EngineConfigReader: Send + Sync {
    // ===== 功耗 =====

    /// 基础功耗 (W)
    ///
    /// # 默认值
    /// - 50.0
    async fn get_baseline_power_w(&self) -> ConfigResult<f64>;

    // ===== 槽位与兼容性 =====

    /// 兼容性必需类别
    ///
    /// # 默认值
    /// - cpu,gpu
    async fn get_required_categories(&self) -> ConfigResult<Vec<Category>>;

    /// 单槽位类别 (基础集合之上可追加,不可移除)
    ///
    /// # 默认值
    /// - cpu,gpu,mb,psu,case
    async fn get_single_slot_categories(&self) -> ConfigResult<Vec<Category>>;

    // ===== 瓶颈估算 =====

    /// 均衡死区
    ///
    /// # 默认值
    /// - 0.05
    async fn get_balance_dead_zone(&self) -> ConfigResult<f64>;

    /// 瓶颈等级阈值 (low_max, moderate_max)
    ///
    /// # 默认值
    /// - (5.0, 15.0)
    async fn get_band_thresholds(&self) -> ConfigResult<(f64, f64)>;

    // ===== 目录拉取 =====

    /// 目录拉取策略 (尝试次数, 重试间隔 ms)
    ///
    /// # 默认值
    /// - (3, 200)
    async fn get_catalog_retry_policy(&self) -> ConfigResult<(u32, u64)>;

    /// 读取完整引擎配置并校验
    async fn read_engine_config(&self) -> ConfigResult<EngineConfig> {
        let (band_low_max_pct, band_moderate_max_pct) = self.get_band_thresholds().await?;
        let (catalog_fetch_attempts, catalog_retry_delay_ms) =
            self.get_catalog_retry_policy().await?;

        let config = EngineConfig {
            baseline_power_w: self.get_baseline_power_w().await?,
            required_categories: self.get_required_categories().await?,
            single_slot_categories: self.get_single_slot_categories().await?,
            balance_dead_zone: self.get_balance_dead_zone().await?,
            band_low_max_pct,
            band_moderate_max_pct,
            catalog_fetch_attempts,
            catalog_retry_delay_ms,
        };

        config.validate()?;
        Ok(config)
    }
}
