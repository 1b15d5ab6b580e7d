// ==========================================
// 装机配置引擎 - 命令行演示入口
// ==========================================
// 用法: build-configurator [catalog.json]
// 未指定目录文件时使用内置示例目录
// 流程: 读取配置 → 加载目录 → 逐个放置目录组件 → 输出快照与导出记录
// ==========================================

use anyhow::Context;
use build_configurator::config::{ConfigManager, EngineConfig, EngineConfigReader};
use build_configurator::{
    logging, AddOutcome, BuildConfigurator, CatalogProvider, ConflictDecision,
    JsonFileCatalogProvider, StaticCatalogProvider,
};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", build_configurator::APP_NAME, build_configurator::VERSION);
    tracing::info!("==================================================");

    let config = load_engine_config().await;
    let mut engine = BuildConfigurator::new(config).context("引擎配置无效")?;

    let provider: Box<dyn CatalogProvider> = match std::env::args().nth(1) {
        Some(path) => Box::new(JsonFileCatalogProvider::new(path)),
        None => Box::new(StaticCatalogProvider::sample()),
    };

    if let Err(e) = engine.load_catalog(provider.as_ref()).await {
        tracing::warn!(error = %e, "目录不可用，会话以降级模式继续");
    }

    let item_ids: Vec<String> = engine
        .catalog()
        .map(|c| c.items().iter().map(|i| i.id.clone()).collect())
        .unwrap_or_default();

    for id in item_ids {
        if let AddOutcome::Conflict(conflict) = engine.add(&id)? {
            tracing::info!(
                existing = %conflict.existing.item.name,
                incoming = %conflict.incoming.name,
                "单槽位已占用，保留现有组件"
            );
            engine.resolve_conflict(ConflictDecision::Abandon)?;
        }
    }

    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    println!("{}", engine.export().to_json()?);

    Ok(())
}

/// 读取引擎配置；配置库不可用时回退默认值
async fn load_engine_config() -> EngineConfig {
    let db_path = get_default_db_path();
    tracing::info!("使用配置库: {}", db_path.display());

    let manager = match ConfigManager::new(&db_path.to_string_lossy()) {
        Ok(manager) => manager,
        Err(e) => {
            tracing::warn!(error = %e, "配置库打开失败，使用默认配置");
            return EngineConfig::default();
        }
    };

    match manager.read_engine_config().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "配置读取失败，使用默认配置");
            EngineConfig::default()
        }
    }
}

/// 默认配置库路径
///
/// 优先使用环境变量 BUILD_CONFIGURATOR_DB_PATH，否则使用用户数据目录
fn get_default_db_path() -> PathBuf {
    if let Ok(path) = std::env::var("BUILD_CONFIGURATOR_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    let mut path = PathBuf::from("./build_configurator.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("build-configurator");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("config.db");
        }
    }
    path
}
