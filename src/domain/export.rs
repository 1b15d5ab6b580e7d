// ==========================================
// 装机配置引擎 - 装机单导出记录
// ==========================================
// 用途: 交给外部持久化协作方的唯一载荷形态
// 内容: 完整目录条目 (非引用) + 统计块
// ==========================================

use crate::domain::build::Build;
use crate::domain::catalog::CatalogItem;
use crate::domain::types::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 无处理器时的名称占位
pub const UNKNOWN_PROCESSOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildStats {
    pub cpu_name: String,          // 处理器名称 (缺失时为 "Unknown")
    pub total_power_w: f64,        // 总功耗 (含基础功耗)
    pub created_at: DateTime<Utc>, // 创建时间
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildExport {
    pub build_id: String,
    pub items: Vec<CatalogItem>,
    pub stats: BuildStats,
}

impl BuildExport {
    /// 由装机单与已计算的总功耗生成导出记录
    pub fn from_build(build: &Build, total_power_w: f64) -> Self {
        let cpu_name = build
            .occupant(&Category::Processor)
            .map(|p| p.item.name.clone())
            .unwrap_or_else(|| UNKNOWN_PROCESSOR.to_string());

        Self {
            build_id: Uuid::new_v4().to_string(),
            items: build.iter().map(|p| p.item.clone()).collect(),
            stats: BuildStats {
                cpu_name,
                total_power_w,
                created_at: Utc::now(),
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
