// ==========================================
// 装机配置引擎 - 派生信号领域模型
// ==========================================
// 职责: 功耗汇总、兼容性结论、瓶颈估算
// 红线: 派生信号只由当前装机单计算,不独立存储
// ==========================================

use crate::domain::types::{BottleneckBand, Category, CompatibilityStatus, LimitingComponent};
use serde::{Deserialize, Serialize};

// ==========================================
// PowerDraw - 功耗汇总
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerDraw {
    pub components_w: f64, // 已放置组件功耗之和
    pub baseline_w: f64,   // 基础功耗 (风扇/主板待机等,配置常量)
    pub total_w: f64,      // 总功耗
}

// ==========================================
// CompatibilityVerdict - 兼容性结论
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityVerdict {
    pub status: CompatibilityStatus,
    pub missing: Vec<Category>, // 缺少的必需类别
}

impl CompatibilityVerdict {
    pub fn is_complete(&self) -> bool {
        self.status == CompatibilityStatus::Complete
    }
}

// ==========================================
// 瓶颈估算不适用原因
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotApplicableReason {
    MissingProcessor,           // 无处理器
    MissingGraphicsAccelerator, // 无显卡
    AmbiguousPairing,           // 处理器或显卡多于一个
    MissingScore,               // 评分为 0 或非有限值
}

// ==========================================
// BottleneckEstimate - 瓶颈估算
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BottleneckEstimate {
    NotApplicable {
        reason: NotApplicableReason,
    },
    Estimated {
        ratio: f64,                           // g / p
        limiting: Option<LimitingComponent>,  // None 表示均衡
        percent: f64,                         // 瓶颈百分比
        band: BottleneckBand,                 // 展示等级
    },
}

impl BottleneckEstimate {
    pub fn not_applicable(reason: NotApplicableReason) -> Self {
        BottleneckEstimate::NotApplicable { reason }
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            BottleneckEstimate::Estimated { percent, .. } => Some(*percent),
            BottleneckEstimate::NotApplicable { .. } => None,
        }
    }

    pub fn band(&self) -> Option<BottleneckBand> {
        match self {
            BottleneckEstimate::Estimated { band, .. } => Some(*band),
            BottleneckEstimate::NotApplicable { .. } => None,
        }
    }

    pub fn limiting(&self) -> Option<LimitingComponent> {
        match self {
            BottleneckEstimate::Estimated { limiting, .. } => *limiting,
            BottleneckEstimate::NotApplicable { .. } => None,
        }
    }
}

// ==========================================
// BuildSignals - 派生信号集合
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSignals {
    pub component_count: usize,
    pub power: PowerDraw,
    pub compatibility: CompatibilityVerdict,
    pub bottleneck: BottleneckEstimate,
}
