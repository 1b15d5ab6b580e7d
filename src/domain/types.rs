// ==========================================
// 装机配置引擎 - 领域类型定义
// ==========================================
// 职责: 组件类别、兼容性状态、瓶颈等级等值类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 组件类别 (Category)
// ==========================================
// 序列化格式: 短代码 (cpu/gpu/mb/memory/storage/psu/case)
// 未识别的类别原样保留,按多槽位处理
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Processor,           // 处理器
    GraphicsAccelerator, // 显卡
    Mainboard,           // 主板
    Memory,              // 内存
    Storage,             // 存储
    PowerSupply,         // 电源
    Enclosure,           // 机箱
    Other(String),       // 未识别类别
}

impl Category {
    /// 解析类别代码（大小写不敏感，支持别名）
    pub fn parse(code: &str) -> Self {
        let normalized = code.trim().to_lowercase();
        match normalized.as_str() {
            "cpu" | "processor" => Category::Processor,
            "gpu" | "graphics" | "graphics-accelerator" | "graphics_accelerator" => {
                Category::GraphicsAccelerator
            }
            "mb" | "motherboard" | "mainboard" => Category::Mainboard,
            "memory" | "ram" => Category::Memory,
            "storage" | "ssd" | "hdd" => Category::Storage,
            "psu" | "power-supply" | "power_supply" => Category::PowerSupply,
            "case" | "enclosure" | "chassis" => Category::Enclosure,
            _ => Category::Other(code.trim().to_string()),
        }
    }

    /// 规范代码
    pub fn code(&self) -> &str {
        match self {
            Category::Processor => "cpu",
            Category::GraphicsAccelerator => "gpu",
            Category::Mainboard => "mb",
            Category::Memory => "memory",
            Category::Storage => "storage",
            Category::PowerSupply => "psu",
            Category::Enclosure => "case",
            Category::Other(code) => code.as_str(),
        }
    }

    /// 解析逗号分隔或 JSON 数组形式的类别列表
    ///
    /// 空白项被忽略,顺序保留,重复项去重
    pub fn parse_list(raw: &str) -> Vec<Category> {
        let trimmed = raw.trim();
        let codes: Vec<String> = if trimmed.starts_with('[') {
            serde_json::from_str(trimmed).unwrap_or_default()
        } else {
            trimmed.split(',').map(|s| s.to_string()).collect()
        };

        let mut categories = Vec::new();
        for code in codes {
            if code.trim().is_empty() {
                continue;
            }
            let category = Category::parse(&code);
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code().to_uppercase())
    }
}

impl From<String> for Category {
    fn from(code: String) -> Self {
        Category::parse(&code)
    }
}

impl From<&str> for Category {
    fn from(code: &str) -> Self {
        Category::parse(code)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.code().to_string()
    }
}

// ==========================================
// 兼容性状态 (Compatibility Status)
// ==========================================
// 仅做存在性检查,不校验电气/物理兼容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompatibilityStatus {
    Complete,   // 必需类别齐全
    Incomplete, // 缺少必需类别
}

impl fmt::Display for CompatibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompatibilityStatus::Complete => write!(f, "COMPLETE"),
            CompatibilityStatus::Incomplete => write!(f, "INCOMPLETE"),
        }
    }
}

// ==========================================
// 瓶颈等级 (Bottleneck Band)
// ==========================================
// 顺序: Low < Moderate < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BottleneckBand {
    Low,      // 均衡/轻微
    Moderate, // 中等
    High,     // 严重
}

impl fmt::Display for BottleneckBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BottleneckBand::Low => write!(f, "LOW"),
            BottleneckBand::Moderate => write!(f, "MODERATE"),
            BottleneckBand::High => write!(f, "HIGH"),
        }
    }
}

// ==========================================
// 限制组件 (Limiting Component)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LimitingComponent {
    Processor,           // 处理器拖累显卡
    GraphicsAccelerator, // 显卡拖累处理器
}

impl fmt::Display for LimitingComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitingComponent::Processor => write!(f, "CPU"),
            LimitingComponent::GraphicsAccelerator => write!(f, "GPU"),
        }
    }
}
