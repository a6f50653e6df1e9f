// ==========================================
// Road appraisal - configuration manager
// ==========================================
// Loads EngineConfig: defaults overridden by config_kv
// Storage: config_kv table (scope_id + key -> value)
// ==========================================

use crate::config::engine_config::{CategoryTable, EngineConfig};
use crate::config::engine_config_reader::EngineConfigReader;
use crate::config::error::{ConfigError, ConfigResult};
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Opens its own connection to `db_path`
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Shares an existing connection (PRAGMAs re-applied, idempotent)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> ConfigResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    // ==========================================
    // Raw key-value access
    // ==========================================

    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn list_global_configs(&self) -> ConfigResult<BTreeMap<String, String>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut map = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Writes one override after checking the resulting config is valid
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let mut candidate = self.load_engine_config()?;
        apply_override(&mut candidate, key, value)?;
        candidate.validate()?;

        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value.trim()],
        )?;
        tracing::info!(config_key = key, value = value.trim(), "configuration override saved");
        Ok(())
    }

    /// Removes an override, falling back to the default
    pub fn remove_global_config_value(&self, key: &str) -> ConfigResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
        )?;
        Ok(affected > 0)
    }

    // ==========================================
    // EngineConfig
    // ==========================================

    /// Defaults overridden by every recognised global key
    pub fn load_engine_config(&self) -> ConfigResult<EngineConfig> {
        let mut config = EngineConfig::default();
        for (key, value) in self.list_global_configs()? {
            if !apply_override(&mut config, &key, &value)? {
                tracing::debug!(config_key = %key, "config key not used by the engine");
            }
        }
        config.validate()?;
        Ok(config)
    }

    // ==========================================
    // Snapshots
    // ==========================================

    /// All global overrides as a JSON object
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let map = self.list_global_configs()?;
        Ok(serde_json::to_string(&map)?)
    }

    /// Replaces all global overrides with the snapshot content
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut candidate = EngineConfig::default();
        for (key, value) in &map {
            apply_override(&mut candidate, key, value)?;
        }
        candidate.validate()?;

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM config_kv WHERE scope_id = ?1",
            params![GLOBAL_SCOPE],
        )?;
        let mut count = 0;
        for (key, value) in &map {
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)",
                params![GLOBAL_SCOPE, key, value],
            )?;
        }
        tx.commit()?;
        Ok(count)
    }
}

// ==========================================
// EngineConfigReader implementation
// ==========================================
#[async_trait]
impl EngineConfigReader for ConfigManager {
    async fn read_engine_config(&self) -> ConfigResult<EngineConfig> {
        self.load_engine_config()
    }
}

// ==========================================
// Override parsing
// ==========================================

/// Applies one key to `config`. Returns false for keys the engine does not use.
pub fn apply_override(config: &mut EngineConfig, key: &str, value: &str) -> ConfigResult<bool> {
    use config_keys::*;

    let t = &mut config.thresholds;
    let a = &mut config.appraisal;
    match key {
        MAX_DESIGN_INTENSITY => t.max_design_intensity = parse_table(key, value)?,
        MIN_STRENGTH_COEFFICIENT => t.min_strength_coefficient = parse_table(key, value)?,
        MAX_EVENNESS_HIGH => t.max_evenness_high_category = parse_f64(key, value)?,
        MAX_EVENNESS_OTHER => t.max_evenness_other_category = parse_f64(key, value)?,
        MAX_RUT_DEPTH_HIGH => t.max_rut_depth_high_category = parse_f64(key, value)?,
        MAX_RUT_DEPTH_OTHER => t.max_rut_depth_other_category = parse_f64(key, value)?,
        REQUIRED_FRICTION => t.required_friction = parse_f64(key, value)?,
        REQUIRED_ELASTIC_MODULUS => t.required_elastic_modulus = parse_f64(key, value)?,
        RIGID_STRENGTH_FACTOR => t.rigid_strength_factor = parse_f64(key, value)?,

        COEFFICIENT_THRESHOLD => {
            config.classifier.coefficient_threshold = parse_f64(key, value)?
        }
        STRENGTH_THRESHOLD => config.classifier.strength_threshold = parse_f64(key, value)?,

        COST_CURRENT_REPAIR => config.unit_costs.current_repair = parse_table(key, value)?,
        COST_CAPITAL_REPAIR => config.unit_costs.capital_repair = parse_table(key, value)?,
        COST_RECONSTRUCTION => config.unit_costs.reconstruction = parse_table(key, value)?,

        DISCOUNT_RATE => a.discount_rate = parse_f64(key, value)?,
        HORIZON_YEARS => a.analysis_horizon_years = parse_u32(key, value)?,
        TRAFFIC_GROWTH_RATE => a.traffic_growth_rate = parse_f64(key, value)?,
        BENEFIT_CURRENT_REPAIR => a.benefit_current_repair = parse_f64(key, value)?,
        BENEFIT_CAPITAL_REPAIR => a.benefit_capital_repair = parse_f64(key, value)?,
        BENEFIT_RECONSTRUCTION => a.benefit_reconstruction = parse_f64(key, value)?,
        MAINTENANCE_COST_RATE => a.maintenance_cost_rate = parse_f64(key, value)?,
        EIRR_LOWER_BOUND => a.eirr_lower_bound = parse_f64(key, value)?,
        EIRR_UPPER_BOUND => a.eirr_upper_bound = parse_f64(key, value)?,
        EIRR_TOLERANCE => a.eirr_tolerance = parse_f64(key, value)?,
        EIRR_MAX_ITERATIONS => a.eirr_max_iterations = parse_u32(key, value)?,

        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_f64(key: &str, value: &str) -> ConfigResult<f64> {
    let parsed = value
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::invalid(key, value, "expected a number"))?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(ConfigError::invalid(key, value, "expected a finite number"))
    }
}

fn parse_u32(key: &str, value: &str) -> ConfigResult<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::invalid(key, value, "expected a non-negative integer"))
}

/// Five comma-separated values, categories I..V
fn parse_table(key: &str, value: &str) -> ConfigResult<CategoryTable> {
    let values = value
        .split(',')
        .map(|part| parse_f64(key, part))
        .collect::<ConfigResult<Vec<f64>>>()?;
    <CategoryTable>::try_from(values.as_slice())
        .map_err(|_| ConfigError::invalid(key, value, "expected 5 comma-separated values (categories I-V)"))
}

// ==========================================
// Config keys (config_kv.key)
// ==========================================
pub mod config_keys {
    // Condition thresholds
    pub const MAX_DESIGN_INTENSITY: &str = "condition.max_design_intensity";
    pub const MIN_STRENGTH_COEFFICIENT: &str = "condition.min_strength_coefficient";
    pub const MAX_EVENNESS_HIGH: &str = "condition.max_evenness_high_category";
    pub const MAX_EVENNESS_OTHER: &str = "condition.max_evenness_other_category";
    pub const MAX_RUT_DEPTH_HIGH: &str = "condition.max_rut_depth_high_category";
    pub const MAX_RUT_DEPTH_OTHER: &str = "condition.max_rut_depth_other_category";
    pub const REQUIRED_FRICTION: &str = "condition.required_friction";
    pub const REQUIRED_ELASTIC_MODULUS: &str = "condition.required_elastic_modulus";
    pub const RIGID_STRENGTH_FACTOR: &str = "condition.rigid_strength_factor";

    // Classifier
    pub const COEFFICIENT_THRESHOLD: &str = "classifier.coefficient_threshold";
    pub const STRENGTH_THRESHOLD: &str = "classifier.strength_threshold";

    // Unit costs, thousand UAH/km
    pub const COST_CURRENT_REPAIR: &str = "cost.current_repair";
    pub const COST_CAPITAL_REPAIR: &str = "cost.capital_repair";
    pub const COST_RECONSTRUCTION: &str = "cost.reconstruction";

    // Appraisal
    pub const DISCOUNT_RATE: &str = "appraisal.discount_rate";
    pub const HORIZON_YEARS: &str = "appraisal.horizon_years";
    pub const TRAFFIC_GROWTH_RATE: &str = "appraisal.traffic_growth_rate";
    pub const BENEFIT_CURRENT_REPAIR: &str = "appraisal.benefit_current_repair";
    pub const BENEFIT_CAPITAL_REPAIR: &str = "appraisal.benefit_capital_repair";
    pub const BENEFIT_RECONSTRUCTION: &str = "appraisal.benefit_reconstruction";
    pub const MAINTENANCE_COST_RATE: &str = "appraisal.maintenance_cost_rate";
    pub const EIRR_LOWER_BOUND: &str = "appraisal.eirr_lower_bound";
    pub const EIRR_UPPER_BOUND: &str = "appraisal.eirr_upper_bound";
    pub const EIRR_TOLERANCE: &str = "appraisal.eirr_tolerance";
    pub const EIRR_MAX_ITERATIONS: &str = "appraisal.eirr_max_iterations";
}
