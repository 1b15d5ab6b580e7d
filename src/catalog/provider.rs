// ==========================================
// 装机配置引擎 - 目录提供方
// ==========================================
// 职责: 定义目录拉取接口 (会话开始时一次性异步拉取)
// 实现: 内存载荷 / JSON 文件
// 说明: 提供方只负责返回原始载荷,解析由 CatalogParser 负责
// ==========================================

use crate::catalog::error::{CatalogError, CatalogResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::PathBuf;

// ==========================================
// CatalogProvider Trait
// ==========================================
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// 拉取原始目录载荷
    async fn fetch(&self) -> CatalogResult<Value>;

    /// 提供方名称（日志用）
    fn name(&self) -> &str;
}

// ==========================================
// StaticCatalogProvider - 内存载荷
// ==========================================
#[derive(Debug, Clone)]
pub struct StaticCatalogProvider {
    payload: Value,
}

impl StaticCatalogProvider {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    /// 内置示例目录
    pub fn sample() -> Self {
        Self::new(sample_payload())
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalogProvider {
    async fn fetch(&self) -> CatalogResult<Value> {
        Ok(self.payload.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

// ==========================================
// JsonFileCatalogProvider - JSON 文件
// ==========================================
#[derive(Debug, Clone)]
pub struct JsonFileCatalogProvider {
    path: PathBuf,
}

impl JsonFileCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogProvider for JsonFileCatalogProvider {
    async fn fetch(&self) -> CatalogResult<Value> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        if raw.trim().is_empty() {
            return Err(CatalogError::Malformed(format!(
                "目录文件为空: {}",
                self.path.display()
            )));
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn name(&self) -> &str {
        "json_file"
    }
}

/// 内置示例目录载荷
///
/// 性能评分越高表示性能越强；功耗单位为瓦
pub fn sample_payload() -> Value {
    json!([
        { "id": "c1", "name": "Aurora Ryzen 9 7950X3D", "type": "cpu",
          "desc": "16-core multi-threaded powerhouse", "performance_score": 95, "power": 170 },
        { "id": "g1", "name": "Nova RTX 4090", "type": "gpu",
          "desc": "Flagship GPU for extreme gaming", "performance_score": 100, "power": 450 },
        { "id": "m1", "name": "Eclipse Z790 Motherboard", "type": "mb",
          "desc": "Premium ATX motherboard", "performance_score": 0, "power": 50 },
        { "id": "r1", "name": "Corsair Vengeance 32GB", "type": "memory",
          "desc": "High-speed DDR5 memory kit", "performance_score": 0, "power": 15 },
        { "id": "s1", "name": "Galaxy NVMe 2TB", "type": "storage",
          "desc": "Blazing fast NVMe SSD", "performance_score": 0, "power": 10 },
        { "id": "p1", "name": "Storm 1000W PSU", "type": "psu",
          "desc": "80+ Gold fully modular power supply", "performance_score": 0, "power": 0 }
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_static_provider_returns_payload() {
        let provider = StaticCatalogProvider::sample();
        let payload = provider.fetch().await.unwrap();
        assert_eq!(payload.as_array().map(|a| a.len()), Some(6));
    }

    #[tokio::test]
    async fn test_json_file_provider_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"cpu": [{{"id": "c9", "name": "CPU Nine"}}]}}"#).unwrap();

        let provider = JsonFileCatalogProvider::new(file.path());
        let payload = provider.fetch().await.unwrap();
        assert!(payload.get("cpu").is_some());
    }

    #[tokio::test]
    async fn test_json_file_provider_missing_file_is_io_error() {
        let provider = JsonFileCatalogProvider::new("/nonexistent/catalog.json");
        let err = provider.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
        assert!(err.is_retryable());
    }
}
