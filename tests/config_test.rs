// ==========================================
// 配置层集成测试
// ==========================================
// 测试目标: config_kv 覆写 → EngineConfig → 会话引擎行为
// ==========================================


use build_configurator::config::{config_keys, ConfigError, EngineConfigReader};
use build_configurator::{
    BottleneckBand, BuildConfigurator, Category, ConfigManager, EngineConfig, EngineError,
};
use test_helpers::{create_standard_catalog, create_test_db, insert_config, open_test_connection};

fn engine_from_db(db_path: &str) -> BuildConfigurator {
    let manager = ConfigManager::new(db_path).unwrap();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let config = runtime.block_on(manager.read_engine_config()).unwrap();

    let mut engine = BuildConfigurator::new(config).unwrap();
    engine.install_catalog(create_standard_catalog());
    engine
}

#[tokio::test]
async fn test_empty_store_yields_defaults() {
    let (_temp, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();

    let config = manager.read_engine_config().await.unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[tokio::test]
async fn test_overrides_are_read() {
    let (_temp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    insert_config(&conn, config_keys::BASELINE_POWER_W, "0").unwrap();
    insert_config(&conn, config_keys::REQUIRED_CATEGORIES, "cpu,gpu,mb,psu").unwrap();
    insert_config(
        &conn,
        config_keys::SINGLE_SLOT_CATEGORIES,
        r#"["cpu","gpu","mb","psu","case","memory"]"#,
    )
    .unwrap();
    insert_config(&conn, config_keys::CATALOG_FETCH_ATTEMPTS, "5").unwrap();

    let manager = ConfigManager::new(&db_path).unwrap();
    let config = manager.read_engine_config().await.unwrap();

    assert_eq!(config.baseline_power_w, 0.0);
    assert_eq!(config.required_categories.len(), 4);
    assert!(config.single_slot_categories.contains(&Category::Memory));
    assert!(config.single_slot_categories.contains(&Category::PowerSupply));
    assert_eq!(config.catalog_fetch_attempts, 5);
}

#[tokio::test]
async fn test_unparseable_value_falls_back() {
    let (_temp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    insert_config(&conn, config_keys::BALANCE_DEAD_ZONE, "wide").unwrap();

    let manager = ConfigManager::new(&db_path).unwrap();
    let config = manager.read_engine_config().await.unwrap();
    assert_eq!(config.balance_dead_zone, 0.05);
}

#[tokio::test]
async fn test_inconsistent_thresholds_are_rejected() {
    let (_temp, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();
    manager.set_config_value(config_keys::BAND_LOW_MAX_PCT, "30").unwrap();

    let result = manager.read_engine_config().await;
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[tokio::test]
async fn test_single_slot_override_cannot_drop_base_categories() {
    let (_temp, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();
    manager
        .set_config_value(config_keys::SINGLE_SLOT_CATEGORIES, "memory")
        .unwrap();

    let result = manager.read_engine_config().await;
    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { ref key, .. }) if key == config_keys::SINGLE_SLOT_CATEGORIES
    ));

    // 直接构造同样被拒绝
    let mut config = EngineConfig::default();
    config.single_slot_categories = vec![Category::Memory];
    assert!(matches!(
        BuildConfigurator::new(config),
        Err(EngineError::Config(ConfigError::InvalidValue { .. }))
    ));

    // 回退默认配置后处理器仍为单槽位
    let mut engine = BuildConfigurator::new(EngineConfig::default()).unwrap();
    engine.install_catalog(create_standard_catalog());
    engine.add("cpu-a").unwrap();
    assert!(engine.add("cpu-b").unwrap().is_conflict());
    assert_eq!(engine.current_build().count(&Category::Processor), 1);
}

#[test]
fn test_overrides_change_engine_behavior() {
    let (_temp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    insert_config(&conn, config_keys::BASELINE_POWER_W, "0").unwrap();
    insert_config(&conn, config_keys::REQUIRED_CATEGORIES, "cpu,gpu,mb,psu").unwrap();
    insert_config(&conn, config_keys::BAND_MODERATE_MAX_PCT, "25").unwrap();
    insert_config(&conn, config_keys::SINGLE_SLOT_CATEGORIES, "cpu,gpu,mb,psu,case,ram").unwrap();
    drop(conn);

    let mut engine = engine_from_db(&db_path);
    engine.add("cpu-a").unwrap();
    engine.add("gpu-b").unwrap();
    engine.add("mb-a").unwrap();
    assert!(engine.add("mb-a").unwrap().is_conflict());
    // 内存追加为单槽位
    engine.add("ram-a").unwrap();
    assert!(engine.add("ram-a").unwrap().is_conflict());

    let signals = engine.signals();
    assert_eq!(signals.power.total_w, 120.0 + 450.0 + 50.0 + 15.0);
    assert_eq!(signals.compatibility.missing, vec![Category::PowerSupply]);
    // 23.1% 落入放宽后的中等区间
    assert_eq!(signals.bottleneck.band(), Some(BottleneckBand::Moderate));
}

#[test]
fn test_config_snapshot_lists_overrides() {
    let (_temp, db_path) = create_test_db().unwrap();
    let manager = ConfigManager::new(&db_path).unwrap();
    manager.set_config_value(config_keys::BASELINE_POWER_W, "75").unwrap();
    manager.set_config_value(config_keys::BASELINE_POWER_W, "80").unwrap();

    let snapshot: serde_json::Value =
        serde_json::from_str(&manager.get_config_snapshot().unwrap()).unwrap();
    assert_eq!(snapshot[config_keys::BASELINE_POWER_W], "80");
    assert_eq!(
        manager
            .get_global_config_value(config_keys::BASELINE_POWER_W)
            .unwrap()
            .as_deref(),
        Some("80")
    );
}
