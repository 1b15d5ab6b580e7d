// ==========================================
// 装机配置引擎 - 引擎配置
// ==========================================
// 职责: 槽位规则、兼容性必需类别、功耗基线、瓶颈阈值等可调参数
// 说明: 各参数均为显式命名配置,默认值见 defaults 模块
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::Category;
use serde::{Deserialize, Serialize};

/// 默认值
pub mod defaults {
    /// 基础功耗 (W): 风扇、主板待机、存储待机等未单独建模的常驻消耗
    pub const BASELINE_POWER_W: f64 = 50.0;
    /// 均衡死区: ratio 落在 [1 - d, 1 + d] 内视为均衡
    pub const BALANCE_DEAD_ZONE: f64 = 0.05;
    /// 低瓶颈上限 (%)
    pub const BAND_LOW_MAX_PCT: f64 = 5.0;
    /// 中等瓶颈上限 (%)
    pub const BAND_MODERATE_MAX_PCT: f64 = 15.0;
    /// 目录拉取尝试次数
    pub const CATALOG_FETCH_ATTEMPTS: u32 = 3;
    /// 目录拉取重试间隔 (ms)
    pub const CATALOG_RETRY_DELAY_MS: u64 = 200;
}

// ==========================================
// CompatibilityPolicy - 兼容性必需类别预设
// ==========================================
pub struct CompatibilityPolicy;

impl CompatibilityPolicy {
    /// 最小集: 处理器 + 显卡 (默认)
    pub fn minimal() -> Vec<Category> {
        vec![Category::Processor, Category::GraphicsAccelerator]
    }

    /// 核心四件: 处理器 + 显卡 + 主板 + 电源
    pub fn core_four() -> Vec<Category> {
        vec![
            Category::Processor,
            Category::GraphicsAccelerator,
            Category::Mainboard,
            Category::PowerSupply,
        ]
    }
}

/// 单槽位类别基础集合 (配置只能追加,不能移除)
pub fn default_single_slot_categories() -> Vec<Category> {
    vec![
        Category::Processor,
        Category::GraphicsAccelerator,
        Category::Mainboard,
        Category::PowerSupply,
        Category::Enclosure,
    ]
}

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub baseline_power_w: f64,
    pub required_categories: Vec<Category>,
    pub single_slot_categories: Vec<Category>,
    pub balance_dead_zone: f64,
    pub band_low_max_pct: f64,
    pub band_moderate_max_pct: f64,
    pub catalog_fetch_attempts: u32,
    pub catalog_retry_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            baseline_power_w: defaults::BASELINE_POWER_W,
            required_categories: CompatibilityPolicy::minimal(),
            single_slot_categories: default_single_slot_categories(),
            balance_dead_zone: defaults::BALANCE_DEAD_ZONE,
            band_low_max_pct: defaults::BAND_LOW_MAX_PCT,
            band_moderate_max_pct: defaults::BAND_MODERATE_MAX_PCT,
            catalog_fetch_attempts: defaults::CATALOG_FETCH_ATTEMPTS,
            catalog_retry_delay_ms: defaults::CATALOG_RETRY_DELAY_MS,
        }
    }
}

impl EngineConfig {
    pub fn with_baseline_power_w(mut self, watts: f64) -> Self {
        self.baseline_power_w = watts;
        self
    }

    pub fn with_required_categories(mut self, categories: Vec<Category>) -> Self {
        self.required_categories = categories;
        self
    }

    pub fn with_catalog_retry(mut self, attempts: u32, delay_ms: u64) -> Self {
        self.catalog_fetch_attempts = attempts;
        self.catalog_retry_delay_ms = delay_ms;
        self
    }

    /// 校验配置
    ///
    /// # 规则
    /// - 基础功耗为非负有限数
    /// - 死区 ∈ [0, 1)
    /// - 0 <= 低瓶颈上限 <= 中等瓶颈上限
    /// - 拉取尝试次数 >= 1
    /// - 单槽位集合包含全部基础类别 (可追加如内存)
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.baseline_power_w.is_finite() || self.baseline_power_w < 0.0 {
            return Err(ConfigError::Validation(format!(
                "baseline_power_w 必须为非负数: {}",
                self.baseline_power_w
            )));
        }

        if !(0.0..1.0).contains(&self.balance_dead_zone) {
            return Err(ConfigError::Validation(format!(
                "balance_dead_zone 必须在 [0, 1) 内: {}",
                self.balance_dead_zone
            )));
        }

        if !self.band_low_max_pct.is_finite()
            || !self.band_moderate_max_pct.is_finite()
            || self.band_low_max_pct < 0.0
            || self.band_low_max_pct > self.band_moderate_max_pct
        {
            return Err(ConfigError::Validation(format!(
                "瓶颈阈值无效: low={}, moderate={}",
                self.band_low_max_pct, self.band_moderate_max_pct
            )));
        }

        if self.catalog_fetch_attempts == 0 {
            return Err(ConfigError::Validation(
                "catalog_fetch_attempts 至少为 1".to_string(),
            ));
        }

        let missing: Vec<String> = default_single_slot_categories()
            .iter()
            .filter(|c| !self.single_slot_categories.contains(c))
            .map(|c| c.code().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "single_slot_categories".to_string(),
                message: format!("缺少基础单槽位类别: {}", missing.join(",")),
            });
        }

        Ok(())
    }
}
