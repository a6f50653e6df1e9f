// ==========================================
// Configuration override tests
// ==========================================
// Scope:
// 1. config_kv overrides reach the engine
// 2. Invalid / unknown overrides are rejected
// 3. Snapshot round trip
// ==========================================

mod test_helpers;

use std::sync::Arc;

use road_appraisal::api::{ApiError, CalculationApi, ConfigApi};
use road_appraisal::config::{config_keys, ConfigError, ConfigManager, EngineConfigReader};
use road_appraisal::repository::SessionRepository;
use road_appraisal::WorkType;
use test_helpers::*;

fn manager(db_path: &str) -> Arc<ConfigManager> {
    Arc::new(ConfigManager::from_connection(open_shared(db_path).unwrap()).unwrap())
}

#[test]
fn test_defaults_without_overrides() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let config = manager(&db_path).load_engine_config().unwrap();
    assert_eq!(config, road_appraisal::EngineConfig::default());
}

#[tokio::test]
async fn test_override_changes_classification() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared(&db_path).unwrap();
    let config_manager = Arc::new(ConfigManager::from_connection(conn.clone()).unwrap());
    let api = CalculationApi::new(
        config_manager.clone(),
        Arc::new(SessionRepository::new(conn)),
    );

    let before = api.calculate(vec![reference_section("S1")]).await.unwrap();
    assert_eq!(before.outcomes[0].work_type, WorkType::NoWorkNeeded);

    // 180/200 = 0.9 falls below a 0.95 strength threshold
    config_manager
        .set_global_config_value(config_keys::STRENGTH_THRESHOLD, "0.95")
        .unwrap();

    let reader: &dyn EngineConfigReader = config_manager.as_ref();
    let config = reader.read_engine_config().await.unwrap();
    assert_eq!(config.classifier.strength_threshold, 0.95);

    let after = api.calculate(vec![reference_section("S1")]).await.unwrap();
    assert_eq!(after.outcomes[0].work_type, WorkType::CapitalRepair);
}

#[test]
fn test_category_table_override() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let manager = manager(&db_path);

    manager
        .set_global_config_value(config_keys::COST_CURRENT_REPAIR, "1,2,3,4,5")
        .unwrap();
    let config = manager.load_engine_config().unwrap();
    assert_eq!(config.unit_costs.current_repair, [1.0, 2.0, 3.0, 4.0, 5.0]);

    let err = manager
        .set_global_config_value(config_keys::COST_CURRENT_REPAIR, "1,2,3")
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_invalid_override_rejected() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let manager = manager(&db_path);

    assert!(matches!(
        manager.set_global_config_value(config_keys::DISCOUNT_RATE, "abc"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(matches!(
        manager.set_global_config_value(config_keys::REQUIRED_ELASTIC_MODULUS, "0"),
        Err(ConfigError::InvalidValue { .. })
    ));
    // nothing was stored
    assert!(manager.list_global_configs().unwrap().is_empty());
}

#[test]
fn test_unknown_key_rejected_by_api() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let api = ConfigApi::new(manager(&db_path));

    let err = api.update_config("appraisal.no_such_key", "1").unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert!(api.list_configs().unwrap().is_empty());
}

#[test]
fn test_horizon_beyond_limit_rejected_by_api() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let api = ConfigApi::new(manager(&db_path));

    let err = api.update_config(config_keys::HORIZON_YEARS, "400").unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(ref msg) if msg.contains("appraisal.horizon_years")));
    assert!(api.list_configs().unwrap().is_empty());
    assert_eq!(api.get_engine_config().unwrap().appraisal.analysis_horizon_years, 20);

    api.update_config(config_keys::HORIZON_YEARS, "100").unwrap();
    assert_eq!(api.get_engine_config().unwrap().appraisal.analysis_horizon_years, 100);
}

#[test]
fn test_snapshot_round_trip() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let api = ConfigApi::new(manager(&db_path));

    api.update_config(config_keys::DISCOUNT_RATE, "0.08").unwrap();
    api.update_config(config_keys::HORIZON_YEARS, "15").unwrap();
    let snapshot = api.get_config_snapshot().unwrap();

    assert!(api.reset_config(config_keys::DISCOUNT_RATE).unwrap());
    assert!(!api.reset_config(config_keys::DISCOUNT_RATE).unwrap());
    assert_eq!(api.get_engine_config().unwrap().appraisal.discount_rate, 0.05);

    assert_eq!(api.restore_config_from_snapshot(&snapshot).unwrap(), 2);
    let config = api.get_engine_config().unwrap();
    assert_eq!(config.appraisal.discount_rate, 0.08);
    assert_eq!(config.appraisal.analysis_horizon_years, 15);
    assert_eq!(
        api.get_config(config_keys::HORIZON_YEARS).unwrap().as_deref(),
        Some("15")
    );
}
