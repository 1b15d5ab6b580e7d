// ==========================================
// 装机配置引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::engine_config::{defaults, default_single_slot_categories, CompatibilityPolicy};
use crate::config::engine_config_reader::EngineConfigReader;
use crate::config::error::{ConfigError, ConfigResult};
use crate::db::{configure_sqlite_connection, ensure_config_schema, open_sqlite_connection};
use crate::domain::types::Category;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 并建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            ensure_config_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    fn lock(&self) -> ConfigResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(config_key = key, value, "配置已更新");
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// 读取数值配置，缺失或无法解析时回退默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr + Copy + std::fmt::Display,
    {
        let Some(raw) = self.get_config_value(key)? else {
            return Ok(default);
        };

        match raw.trim().parse::<T>() {
            Ok(value) => Ok(value),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default,
                    "配置值无法解析，使用默认值"
                );
                Ok(default)
            }
        }
    }

    /// 读取类别列表配置，缺失或为空时回退默认值
    fn get_categories_or_default(
        &self,
        key: &str,
        default: Vec<Category>,
    ) -> ConfigResult<Vec<Category>> {
        let Some(raw) = self.get_config_value(key)? else {
            return Ok(default);
        };

        let categories = Category::parse_list(&raw);
        if categories.is_empty() {
            tracing::warn!(config_key = key, raw_value = %raw, "类别列表为空，使用默认值");
            Ok(default)
        } else {
            Ok(categories)
        }
    }
}

// ==========================================
// EngineConfigReader Trait 实现
// ==========================================
#[async_trait]
impl EngineConfigReader for ConfigManager {
    async fn get_baseline_power_w(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::BASELINE_POWER_W, defaults::BASELINE_POWER_W)
    }

    async fn get_required_categories(&self) -> ConfigResult<Vec<Category>> {
        self.get_categories_or_default(
            config_keys::REQUIRED_CATEGORIES,
            CompatibilityPolicy::minimal(),
        )
    }

    async fn get_single_slot_categories(&self) -> ConfigResult<Vec<Category>> {
        self.get_categories_or_default(
            config_keys::SINGLE_SLOT_CATEGORIES,
            default_single_slot_categories(),
        )
    }

    async fn get_balance_dead_zone(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::BALANCE_DEAD_ZONE, defaults::BALANCE_DEAD_ZONE)
    }

    async fn get_band_thresholds(&self) -> ConfigResult<(f64, f64)> {
        let low = self.get_parsed_or_default(config_keys::BAND_LOW_MAX_PCT, defaults::BAND_LOW_MAX_PCT)?;
        let moderate = self.get_parsed_or_default(
            config_keys::BAND_MODERATE_MAX_PCT,
            defaults::BAND_MODERATE_MAX_PCT,
        )?;
        Ok((low, moderate))
    }

    async fn get_catalog_retry_policy(&self) -> ConfigResult<(u32, u64)> {
        let attempts = self.get_parsed_or_default(
            config_keys::CATALOG_FETCH_ATTEMPTS,
            defaults::CATALOG_FETCH_ATTEMPTS,
        )?;
        let delay_ms = self.get_parsed_or_default(
            config_keys::CATALOG_RETRY_DELAY_MS,
            defaults::CATALOG_RETRY_DELAY_MS,
        )?;
        Ok((attempts, delay_ms))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 功耗
    pub const BASELINE_POWER_W: &str = "baseline_power_w";

    // 槽位与兼容性
    pub const REQUIRED_CATEGORIES: &str = "required_categories";
    pub const SINGLE_SLOT_CATEGORIES: &str = "single_slot_categories";

    // 瓶颈估算
    pub const BALANCE_DEAD_ZONE: &str = "balance_dead_zone";
    pub const BAND_LOW_MAX_PCT: &str = "band_low_max_pct";
    pub const BAND_MODERATE_MAX_PCT: &str = "band_moderate_max_pct";

    // 目录拉取
    pub const CATALOG_FETCH_ATTEMPTS: &str = "catalog_fetch_attempts";
    pub const CATALOG_RETRY_DELAY_MS: &str = "catalog_retry_delay_ms";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::engine_config::EngineConfig;

    fn create_in_memory_manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[tokio::test]
    async fn test_empty_table_yields_defaults() {
        let manager = create_in_memory_manager();
        let config = manager.read_engine_config().await.unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[tokio::test]
    async fn test_overrides_are_applied() {
        let manager = create_in_memory_manager();
        manager.set_config_value(config_keys::BASELINE_POWER_W, "0").unwrap();
        manager
            .set_config_value(config_keys::REQUIRED_CATEGORIES, "cpu,gpu,mb,psu")
            .unwrap();

        let config = manager.read_engine_config().await.unwrap();
        assert_eq!(config.baseline_power_w, 0.0);
        assert_eq!(config.required_categories, CompatibilityPolicy::core_four());
    }

    #[tokio::test]
    async fn test_unparseable_value_falls_back() {
        let manager = create_in_memory_manager();
        manager
            .set_config_value(config_keys::BALANCE_DEAD_ZONE, "wide")
            .unwrap();

        let dead_zone = manager.get_balance_dead_zone().await.unwrap();
        assert_eq!(dead_zone, defaults::BALANCE_DEAD_ZONE);
    }

    #[tokio::test]
    async fn test_invalid_combination_fails_validation() {
        let manager = create_in_memory_manager();
        manager.set_config_value(config_keys::BAND_LOW_MAX_PCT, "30").unwrap();

        let result = manager.read_engine_config().await;
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_snapshot_contains_values() {
        let manager = create_in_memory_manager();
        manager.set_config_value(config_keys::BASELINE_POWER_W, "65").unwrap();
        manager.set_config_value(config_keys::BASELINE_POWER_W, "75").unwrap();

        let snapshot = manager.get_config_snapshot().unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(parsed.get("baseline_power_w").map(String::as_str), Some("75"));
    }
}
