// ==========================================
// 装机配置引擎 - 目录载荷解析器
// ==========================================
// 职责: 外部目录载荷 → CatalogItem 列表 (容错)
// 支持:
// - 扁平数组: [ {..}, {..} ]
// - 类别映射: { "cpu": [ {..} ], "gpu": [ {..} ] } (条目缺类别时由键推断)
// 规则:
// - 缺少名称的条目视为无效,丢弃
// - 缺少 id 时以名称作为 id
// - 重复 id 保留首个
// - 数值字段缺失为 0; 负数/非有限值归零
// ==========================================

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::domain::catalog::{Catalog, CatalogItem};
use crate::domain::types::Category;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// 解析统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub accepted: usize,   // 接受条目数
    pub discarded: usize,  // 无效条目数 (非对象/缺名称)
    pub duplicates: usize, // 重复 id 条目数
}

pub struct CatalogParser;

impl CatalogParser {
    /// 解析目录载荷
    pub fn parse(&self, payload: &Value) -> CatalogResult<(Catalog, ParseReport)> {
        let mut entries: Vec<(&Value, Option<&str>)> = Vec::new();

        match payload {
            Value::Array(list) => {
                entries.extend(list.iter().map(|entry| (entry, None)));
            }
            Value::Object(groups) => {
                for (key, group) in groups {
                    match group {
                        Value::Array(list) => {
                            entries.extend(list.iter().map(|entry| (entry, Some(key.as_str()))));
                        }
                        other => {
                            tracing::warn!(
                                group = %key,
                                kind = value_kind(other),
                                "目录分组不是数组，已忽略"
                            );
                        }
                    }
                }
            }
            other => {
                return Err(CatalogError::Malformed(format!(
                    "期望数组或对象，实际为 {}",
                    value_kind(other)
                )));
            }
        }

        let mut report = ParseReport::default();
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut items = Vec::with_capacity(entries.len());

        for (index, (entry, group_key)) in entries.into_iter().enumerate() {
            let Some(item) = self.map_entry(entry, group_key, index) else {
                report.discarded += 1;
                continue;
            };

            if !seen_ids.insert(item.id.clone()) {
                tracing::warn!(item_id = %item.id, "目录条目 id 重复，保留首个");
                report.duplicates += 1;
                continue;
            }

            items.push(item);
        }

        report.accepted = items.len();
        Ok((Catalog::new(items), report))
    }

    /// 单条目映射；返回 None 表示条目无效
    fn map_entry(&self, entry: &Value, group_key: Option<&str>, index: usize) -> Option<CatalogItem> {
        let Value::Object(fields) = entry else {
            tracing::warn!(index, kind = value_kind(entry), "目录条目不是对象，已丢弃");
            return None;
        };

        let Some(name) = get_string(fields, &["name"]) else {
            tracing::warn!(index, "目录条目缺少名称，已丢弃");
            return None;
        };

        let id = get_string(fields, &["id"]).unwrap_or_else(|| name.clone());

        let category = get_string(fields, &["category", "type"])
            .or_else(|| group_key.map(|k| k.to_string()))
            .map(|code| Category::parse(&code))
            .unwrap_or_else(|| Category::Other(String::new()));

        Some(CatalogItem {
            description: get_string(fields, &["description", "desc"]).unwrap_or_default(),
            power_draw: get_non_negative(fields, &["power_draw", "powerDraw", "power"], &id),
            performance_score: get_non_negative(
                fields,
                &["performance_score", "performanceScore", "bottleneck_score", "score"],
                &id,
            ),
            id,
            category,
            name,
        })
    }
}

/// 提取字符串字段，支持多个别名；数字 id 转为字符串
fn get_string(fields: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    for alias in aliases {
        match fields.get(*alias) {
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// 提取非负数值字段（数字或数字字符串），缺失/无效为 0
fn get_non_negative(fields: &Map<String, Value>, aliases: &[&str], item_id: &str) -> f64 {
    for alias in aliases {
        let raw = match fields.get(*alias) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => continue,
        };

        return match raw {
            Some(v) if v.is_finite() && v >= 0.0 => v,
            _ => {
                tracing::warn!(item_id, field = *alias, "数值字段无效，按 0 处理");
                0.0
            }
        };
    }
    0.0
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
